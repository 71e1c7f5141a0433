use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::choices::Choice;
use super::domain::{Application, ApplicationField};
use super::gateway::{SubmissionGateway, SubmissionReceipt};
use super::steps::FORM_STEPS;
use super::validation::check_submittable;
use crate::error::AppError;

pub type SharedGateway = Arc<dyn SubmissionGateway>;

/// Router exposing the submit action and the form layout.
pub fn application_router(gateway: SharedGateway) -> Router {
    Router::new()
        .route("/api/v1/applications", post(submit_handler))
        .route("/api/v1/applications/form", get(form_handler))
        .with_state(gateway)
}

pub(crate) async fn submit_handler(
    State(gateway): State<SharedGateway>,
    Json(application): Json<Application>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError> {
    check_submittable(&application)?;
    let receipt = gateway.submit(&application).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Debug, Serialize)]
pub struct FormLayoutView {
    pub steps: Vec<StepView>,
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [Choice]>,
}

impl FormLayoutView {
    pub fn current() -> Self {
        let steps = FORM_STEPS
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                index,
                title: step.title,
                description: step.description,
                fields: step.fields.iter().copied().map(FieldView::from).collect(),
            })
            .collect();
        Self { steps }
    }
}

impl From<ApplicationField> for FieldView {
    fn from(field: ApplicationField) -> Self {
        Self {
            key: field.key(),
            label: field.label(),
            required: field.is_required(),
            choices: field.choices(),
        }
    }
}

pub(crate) async fn form_handler() -> Json<FormLayoutView> {
    Json(FormLayoutView::current())
}
