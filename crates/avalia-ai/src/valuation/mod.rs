//! Property valuation form: canonical record, declarative field schema,
//! stepped/single-page rendering, and the price estimation client.

pub mod catalog;
pub mod clamp;
pub mod domain;
pub mod edit;
pub mod estimation;
pub mod render;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod schema;
pub mod service;
pub mod session;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::SelectOption;
pub use domain::{PropertyData, PropertySubtype, PropertyType, Rating};
pub use edit::{apply_edit, FieldEdit, FieldInput};
pub use estimation::{
    EstimateRejected, EstimateSlot, EstimateStatus, EstimationError, EstimationRequest,
    EstimationResponse, HttpPriceEstimator, PriceEstimator, ESTIMATE_ERROR_MESSAGE,
};
pub use render::{render, FieldView, FormLayout, FormView, SectionView, StepView};
pub use repository::{RepositoryError, SessionRepository};
pub use router::valuation_router;
pub use schema::{FieldId, FormSection};
pub use service::{ValuationService, ValuationServiceError};
pub use session::{AdvanceOutcome, FormSession, SessionId, SUBMISSION_CONFIRMATION};
pub use wizard::{StepController, StepTransition, WizardStep};
