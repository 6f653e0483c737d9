use crate::core::{MealPlanRequester, TextGenerationService};
use crate::domain::model::{ActivityLevel, ApiKey, Language, MealPlanResult, PatientProfile};
use crate::utils::error::{GlucoError, Result};
use crate::utils::validation::{validate_reading, Validate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw form input, before it is checked and turned into a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub fasting_sugar: f64,
    pub pre_meal_sugar: f64,
    pub post_meal_sugar: f64,
    pub dietary_preferences: String,
    pub age: u32,
    pub activity_level: ActivityLevel,
    pub language: Language,
}

impl Validate for PatientForm {
    fn validate(&self) -> Result<()> {
        validate_reading("fasting_sugar", self.fasting_sugar)?;
        validate_reading("pre_meal_sugar", self.pre_meal_sugar)?;
        validate_reading("post_meal_sugar", self.post_meal_sugar)?;
        Ok(())
    }
}

impl PatientForm {
    pub fn to_profile(&self) -> PatientProfile {
        PatientProfile {
            fasting_sugar: self.fasting_sugar,
            pre_meal_sugar: self.pre_meal_sugar,
            post_meal_sugar: self.post_meal_sugar,
            dietary_preferences: self.dietary_preferences.trim().to_string(),
            age: self.age,
            activity_level: self.activity_level,
            language: self.language,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlanReport {
    pub result: MealPlanResult,
    pub generated_at: DateTime<Utc>,
}

/// One user's form session: credential, requester and the last shown result.
pub struct FormSession<S: TextGenerationService> {
    requester: MealPlanRequester<S>,
    api_key: Option<ApiKey>,
    last: Option<MealPlanReport>,
}

impl<S: TextGenerationService> FormSession<S> {
    pub fn new(requester: MealPlanRequester<S>, api_key: Option<ApiKey>) -> Self {
        Self {
            requester,
            api_key,
            last: None,
        }
    }

    pub fn requester(&self) -> &MealPlanRequester<S> {
        &self.requester
    }

    /// Validate the form and run one request. Only input and credential
    /// problems are errors; a failed exchange is still a stored report.
    pub async fn submit(&mut self, form: &PatientForm) -> Result<&MealPlanReport> {
        form.validate()?;

        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GlucoError::MissingConfigError {
                field: "claude_api_key".to_string(),
            })?;

        let result = self
            .requester
            .request_plan(&form.to_profile(), api_key)
            .await;

        let report = MealPlanReport {
            result,
            generated_at: Utc::now(),
        };
        Ok(self.last.insert(report))
    }

    pub fn last_result(&self) -> Option<&MealPlanReport> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
