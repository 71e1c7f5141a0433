use tracing::{debug, info, warn};

use super::domain::{Application, ApplicationField};
use super::gateway::{SubmissionError, SubmissionGateway, SubmissionReceipt};
use super::steps::{self, FormStep, FORM_STEPS, LAST_STEP};
use super::validation::{check_fields, FieldErrors};

/// Result of a `submit` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(SubmissionReceipt),
    /// Required fields are blank; see `errors()`.
    Invalid,
    /// The store rejected the write; data is intact for a retry.
    Failed(SubmissionError),
    NotOnFinalStep,
    AlreadySubmitted,
}

/// State of one applicant's pass through the form.
///
/// Owns the record being filled in. Steps move forward only through a passing
/// step validation and backward freely; a successful submission is terminal.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    step: usize,
    fields: Application,
    errors: FieldErrors,
    submitting: bool,
    submitted: bool,
    submission_error: Option<SubmissionError>,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the first step with values already filled in.
    pub fn with_fields(fields: Application) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> &'static FormStep {
        &FORM_STEPS[self.step]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// One-based position and total, for "Step n of m".
    pub fn progress(&self) -> (usize, usize) {
        (self.step + 1, FORM_STEPS.len())
    }

    pub fn fields(&self) -> &Application {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Last gateway failure, kept apart from field errors.
    pub fn submission_error(&self) -> Option<&SubmissionError> {
        self.submission_error.as_ref()
    }

    pub fn update_field(&mut self, field: ApplicationField, value: impl Into<String>) {
        if self.submitted {
            debug!(%field, "ignoring edit to a submitted application");
            return;
        }
        self.fields.set(field, value);
        self.errors.remove(field);
    }

    /// Check the required fields of `step`, replacing the error map with what is missing.
    pub fn validate_step(&mut self, step: usize) -> bool {
        self.errors = check_fields(&self.fields, steps::required_fields(step));
        self.errors.is_empty()
    }

    /// Check every required field, independent of the current step.
    pub fn validate_all(&mut self) -> bool {
        self.errors = check_fields(&self.fields, ApplicationField::ALL);
        self.errors.is_empty()
    }

    /// Move to the next step if the current one validates. Returns whether the step changed.
    pub fn advance(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        if self.validate_step(self.step) && self.step < LAST_STEP {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous step without validating. Returns whether the step changed.
    pub fn retreat(&mut self) -> bool {
        if self.submitted || self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Validate everything and hand the record to `gateway` once.
    pub async fn submit<G>(&mut self, gateway: &G) -> SubmitOutcome
    where
        G: SubmissionGateway + ?Sized,
    {
        if self.submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        if self.step != LAST_STEP {
            return SubmitOutcome::NotOnFinalStep;
        }
        if !self.validate_all() {
            debug!(missing = self.errors.len(), "submission blocked by validation");
            return SubmitOutcome::Invalid;
        }

        self.submission_error = None;
        let result = {
            let _in_flight = InFlight::start(&mut self.submitting);
            gateway.submit(&self.fields).await
        };

        match result {
            Ok(receipt) => {
                info!(table = %receipt.table, "application submitted");
                self.submitted = true;
                SubmitOutcome::Submitted(receipt)
            }
            Err(err) => {
                warn!(error = %err.message(), "application submission failed");
                self.submission_error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Holds `submitting` high for the life of one gateway call, including a call
/// whose future is dropped before it completes.
struct InFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
