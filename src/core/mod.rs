pub mod requester;

pub use crate::domain::model::{MealPlanResult, PatientProfile};
pub use crate::domain::ports::{ServiceSettings, TextGenerationService};
pub use crate::utils::error::Result;
pub use requester::{MealPlanRequester, RequestSettings};
