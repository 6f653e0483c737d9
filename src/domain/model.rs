use crate::utils::error::GlucoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = GlucoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GlucoError::InvalidInput {
                field: "activity_level".to_string(),
                reason: format!("'{}' is not one of Sedentary, Light, Moderate, Active", s),
            })
    }
}

/// Language the meal plan should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health and lifestyle inputs for one meal plan request.
///
/// Readings are in mg/dL. Nothing here is validated; the form layer checks
/// readings before a profile reaches the requester.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientProfile {
    pub fasting_sugar: f64,
    pub pre_meal_sugar: f64,
    pub post_meal_sugar: f64,
    pub dietary_preferences: String,
    pub age: u32,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The service rejected the request (bad credential, malformed payload).
    ClientRequest,
    /// The service answered but there was no content to show.
    MalformedResponse,
    /// Transport, timeout, server-side or decoding failure.
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanFailure {
    pub kind: FailureKind,
    pub message: String,
}

pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Unexpected response structure. Please check the API documentation.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MealPlanResult {
    Plan { text: String },
    Failed(MealPlanFailure),
}

impl MealPlanResult {
    pub fn plan(text: impl Into<String>) -> Self {
        MealPlanResult::Plan { text: text.into() }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        MealPlanResult::Failed(MealPlanFailure {
            kind,
            message: message.into(),
        })
    }

    pub fn is_plan(&self) -> bool {
        matches!(self, MealPlanResult::Plan { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            MealPlanResult::Plan { .. } => None,
            MealPlanResult::Failed(failure) => Some(failure.kind),
        }
    }

    /// Text shown to the user, whatever the outcome.
    pub fn display_text(&self) -> String {
        match self {
            MealPlanResult::Plan { text } => text.clone(),
            MealPlanResult::Failed(MealPlanFailure { kind, message }) => match kind {
                FailureKind::ClientRequest => format!("Error: {}", message),
                FailureKind::MalformedResponse => message.clone(),
                FailureKind::Unexpected => format!("An unexpected error occurred: {}", message),
            },
        }
    }
}

/// Credential for the text-generation service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_parse_case_insensitive() {
        assert_eq!("moderate".parse::<ActivityLevel>().unwrap(), ActivityLevel::Moderate);
        assert_eq!(" Active ".parse::<ActivityLevel>().unwrap(), ActivityLevel::Active);
        assert!("athletic".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_display_text_per_kind() {
        assert_eq!(MealPlanResult::plan("Day 1").display_text(), "Day 1");
        assert_eq!(
            MealPlanResult::failed(FailureKind::ClientRequest, "invalid_api_key").display_text(),
            "Error: invalid_api_key"
        );
        assert_eq!(
            MealPlanResult::failed(FailureKind::MalformedResponse, MALFORMED_RESPONSE_MESSAGE)
                .display_text(),
            MALFORMED_RESPONSE_MESSAGE
        );
        assert_eq!(
            MealPlanResult::failed(FailureKind::Unexpected, "Connection reset").display_text(),
            "An unexpected error occurred: Connection reset"
        );
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let json = serde_json::to_value(MealPlanResult::failed(
            FailureKind::ClientRequest,
            "invalid_api_key",
        ))
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "client_request");
        assert_eq!(json["message"], "invalid_api_key");

        let json = serde_json::to_value(MealPlanResult::plan("Breakfast: oats")).unwrap();
        assert_eq!(json["status"], "plan");
        assert_eq!(json["text"], "Breakfast: oats");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-ant-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "sk-ant-secret");
    }
}
