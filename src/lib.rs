pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{create_service, AnthropicClient, FakeService};
pub use app::session::{FormSession, MealPlanReport, PatientForm};
pub use config::TomlConfig;
pub use crate::core::{MealPlanRequester, RequestSettings};
pub use domain::model::{
    ActivityLevel, ApiKey, FailureKind, Language, MealPlanFailure, MealPlanResult, PatientProfile,
};
pub use utils::error::{GlucoError, Result};
