use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlucoError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    System,
}

impl GlucoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GlucoError::Http(_) => ErrorCategory::Network,
            GlucoError::IoError(_) => ErrorCategory::System,
            GlucoError::ConfigError { .. }
            | GlucoError::ConfigValidationError { .. }
            | GlucoError::InvalidConfigValueError { .. }
            | GlucoError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GlucoError::InvalidInput { .. } => ErrorCategory::Input,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            GlucoError::MissingConfigError { field } if field == "claude_api_key" => {
                "Please enter your API key.".to_string()
            }
            GlucoError::InvalidInput { field, reason } => {
                format!("Please check the value of {}: {}", field, reason)
            }
            GlucoError::Http(_) => "Could not set up the connection to the meal plan service.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GlucoError::MissingConfigError { .. } => {
                "Set [secrets] claude_api_key in the config file or export ANTHROPIC_API_KEY"
            }
            GlucoError::InvalidInput { .. } => "Sugar readings must be zero or greater",
            GlucoError::ConfigError { .. }
            | GlucoError::ConfigValidationError { .. }
            | GlucoError::InvalidConfigValueError { .. } => {
                "Check the config file for typos and invalid values"
            }
            GlucoError::Http(_) => "Check TLS and proxy settings, then try again",
            GlucoError::IoError(_) => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, GlucoError>;
