use crate::domain::model::{Language, PatientProfile};

/// Render a profile into the single user turn sent to the model.
pub fn render_prompt(profile: &PatientProfile) -> String {
    let mut prompt = format!(
        "My fasting sugar level is {}, \
         my pre-meal sugar level is {}, \
         and my post-meal sugar level is {}. \
         My dietary preferences are {}. \
         I am {} years old and my activity level is {}. \
         Please provide a detailed personalized meal plan.",
        profile.fasting_sugar,
        profile.pre_meal_sugar,
        profile.post_meal_sugar,
        profile.dietary_preferences,
        profile.age,
        profile.activity_level,
    );

    if profile.language != Language::English {
        prompt.push_str(&format!(" Please write the meal plan in {}.", profile.language));
    }

    prompt
}
