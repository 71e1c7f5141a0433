use std::collections::BTreeMap;

use serde::Serialize;

use super::choices;
use super::domain::{Application, ApplicationField};

pub const UNLISTED_CHOICE_MESSAGE: &str = "Select one of the offered options";

/// Field-keyed error messages shown beside the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ApplicationField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: ApplicationField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: ApplicationField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: ApplicationField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn remove(&mut self, field: ApplicationField) -> Option<&'static str> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = ApplicationField> + '_ {
        self.0.keys().copied()
    }

    fn joined_keys(&self) -> String {
        let keys: Vec<&str> = self.fields().map(ApplicationField::key).collect();
        keys.join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (ApplicationField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Why a record cannot be written, with the offending fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("application is incomplete: {}", .0.joined_keys())]
    Incomplete(FieldErrors),
    #[error("application contains unlisted choices: {}", .0.joined_keys())]
    UnlistedChoices(FieldErrors),
}

impl ValidationError {
    pub fn errors(&self) -> &FieldErrors {
        match self {
            Self::Incomplete(errors) | Self::UnlistedChoices(errors) => errors,
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        match self {
            Self::Incomplete(errors) | Self::UnlistedChoices(errors) => errors,
        }
    }
}

/// Errors for each blank field in `fields` that carries a required message.
pub fn check_fields<I>(application: &Application, fields: I) -> FieldErrors
where
    I: IntoIterator<Item = ApplicationField>,
{
    let mut errors = FieldErrors::default();
    for field in fields {
        if let Some(message) = field.required_message() {
            if application.is_blank(field) {
                errors.insert(field, message);
            }
        }
    }
    errors
}

/// Check every required field regardless of step.
pub fn check_complete(application: &Application) -> Result<(), ValidationError> {
    let errors = check_fields(application, ApplicationField::ALL);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Incomplete(errors))
    }
}

/// Choice fields holding a token outside their closed set.
pub fn check_choices(application: &Application) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for (field, value) in application.entries() {
        if !choices::is_offered(field, value) {
            errors.insert(field, UNLISTED_CHOICE_MESSAGE);
        }
    }
    errors
}

/// Gate for records arriving from outside the form: complete first, then listed choices.
pub fn check_submittable(application: &Application) -> Result<(), ValidationError> {
    check_complete(application)?;
    let unlisted = check_choices(application);
    if unlisted.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnlistedChoices(unlisted))
    }
}
