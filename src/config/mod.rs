pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::app::session::PatientForm;
#[cfg(feature = "cli")]
use crate::domain::model::{ActivityLevel, Language};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "glucoguide")]
#[command(about = "Personalized meal plans for diabetic patients from sugar readings and lifestyle")]
pub struct CliConfig {
    /// Fasting sugar level (mg/dL)
    #[arg(long, allow_negative_numbers = true)]
    pub fasting_sugar: f64,

    /// Pre-meal sugar level (mg/dL)
    #[arg(long, allow_negative_numbers = true)]
    pub pre_meal_sugar: f64,

    /// Post-meal sugar level (mg/dL)
    #[arg(long, allow_negative_numbers = true)]
    pub post_meal_sugar: f64,

    /// Dietary preferences, e.g. "vegetarian, low-carb"
    #[arg(long, default_value = "")]
    pub dietary_preferences: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long, value_enum, default_value = "sedentary")]
    pub activity_level: ActivityLevel,

    /// Language the meal plan is written in
    #[arg(long, value_enum, default_value = "english")]
    pub language: Language,

    /// Path to TOML settings file; defaults apply when it does not exist
    #[arg(short, long, default_value = "glucoguide.toml")]
    pub config: String,

    /// Override service.model
    #[arg(long)]
    pub model: Option<String>,

    /// Override service.endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override service.timeout_seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_form(&self) -> PatientForm {
        PatientForm {
            fasting_sugar: self.fasting_sugar,
            pre_meal_sugar: self.pre_meal_sugar,
            post_meal_sugar: self.post_meal_sugar,
            dietary_preferences: self.dietary_preferences.clone(),
            age: self.age,
            activity_level: self.activity_level,
            language: self.language,
        }
    }

    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(model) = &self.model {
            config.service.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.service.timeout_seconds = timeout;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_arguments() {
        let cli = CliConfig::try_parse_from([
            "glucoguide",
            "--fasting-sugar",
            "110",
            "--pre-meal-sugar",
            "95",
            "--post-meal-sugar",
            "180.5",
            "--dietary-preferences",
            "vegan",
            "--age",
            "42",
            "--activity-level",
            "moderate",
            "--language",
            "french",
        ])
        .unwrap();

        let form = cli.to_form();
        assert_eq!(form.fasting_sugar, 110.0);
        assert_eq!(form.post_meal_sugar, 180.5);
        assert_eq!(form.dietary_preferences, "vegan");
        assert_eq!(form.age, 42);
        assert_eq!(form.activity_level, ActivityLevel::Moderate);
        assert_eq!(form.language, Language::French);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_unknown_activity_level_rejected() {
        let result = CliConfig::try_parse_from([
            "glucoguide",
            "--fasting-sugar",
            "110",
            "--pre-meal-sugar",
            "95",
            "--post-meal-sugar",
            "180",
            "--age",
            "42",
            "--activity-level",
            "athletic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = CliConfig::try_parse_from([
            "glucoguide",
            "--fasting-sugar",
            "1",
            "--pre-meal-sugar",
            "1",
            "--post-meal-sugar",
            "1",
            "--age",
            "1",
            "--model",
            "claude-override",
            "--timeout",
            "5",
        ])
        .unwrap();

        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.service.model, "claude-override");
        assert_eq!(config.service.timeout_seconds, 5);
        assert_eq!(config.service.endpoint, toml_config::DEFAULT_ENDPOINT);
    }
}
