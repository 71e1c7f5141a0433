//! Five-step applicant form: field model, per-step validation, the form state
//! machine and the one-shot submission to the hosted store.

pub mod casing;
pub mod choices;
pub mod domain;
pub mod gateway;
pub mod machine;
pub mod postgrest;
pub mod router;
pub mod steps;
pub mod validation;

#[cfg(test)]
mod tests;

pub use choices::Choice;
pub use domain::{Application, ApplicationField};
pub use gateway::{
    application_row, ApplicationStore, StoreError, StoreGateway, StoreRow, SubmissionError,
    SubmissionGateway, SubmissionReceipt, APPLICATIONS_TABLE, SUBMISSION_FALLBACK_MESSAGE,
};
pub use machine::{ApplicationForm, SubmitOutcome};
pub use postgrest::PostgrestStore;
pub use router::{application_router, FormLayoutView, SharedGateway};
pub use steps::{FormStep, FORM_STEPS, LAST_STEP};
pub use validation::{
    check_choices, check_complete, check_submittable, FieldErrors, ValidationError,
};
