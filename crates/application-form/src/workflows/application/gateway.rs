use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use super::casing::snake_case_keys;
use super::domain::Application;

/// Table receiving submitted applications.
pub const APPLICATIONS_TABLE: &str = "applications";

/// Reported when the store rejects a write without saying why.
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to submit application";

/// One row as the store sees it: snake_case column to text value.
pub type StoreRow = BTreeMap<String, String>;

/// The store rejected (or never received) the submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionError {
    message: String,
}

impl SubmissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Use the store's message, or the fallback when it has none.
    pub fn from_store_message(message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|message| !message.is_empty()) {
            Some(message) => Self::new(message),
            None => Self::new(SUBMISSION_FALLBACK_MESSAGE),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Acknowledgement of a stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub table: String,
}

/// Persists one validated application per call.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, application: &Application)
        -> Result<SubmissionReceipt, SubmissionError>;
}

/// Failure reported by the store: its own message when it sent one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("store rejected insert: {}", .message.as_deref().unwrap_or("no message"))]
pub struct StoreError {
    pub message: Option<String>,
    pub status: Option<u16>,
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            status: None,
        }
    }

    pub fn silent() -> Self {
        Self {
            message: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Insert-capable hosted store.
#[async_trait]
pub trait ApplicationStore: Send + Sync + Debug {
    async fn insert(&self, table: &str, rows: Vec<StoreRow>) -> Result<(), StoreError>;
}

/// Build the store row for an application, keyed by snake_case column.
pub fn application_row(application: &Application) -> StoreRow {
    snake_case_keys(
        application
            .entries()
            .map(|(field, value)| (field.key(), value.to_string())),
    )
}

/// Gateway writing each submission as a single new row.
///
/// No retries and no deduplication: submitting the same application twice
/// stores two rows.
#[derive(Debug)]
pub struct StoreGateway<S> {
    store: Arc<S>,
    table: String,
}

impl<S> StoreGateway<S>
where
    S: ApplicationStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_table(store, APPLICATIONS_TABLE)
    }

    pub fn with_table(store: Arc<S>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl<S> SubmissionGateway for StoreGateway<S>
where
    S: ApplicationStore + 'static,
{
    async fn submit(
        &self,
        application: &Application,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let row = application_row(application);
        let columns = row.len();

        match self.store.insert(&self.table, vec![row]).await {
            Ok(()) => {
                info!(table = %self.table, columns, "application stored");
                Ok(SubmissionReceipt {
                    success: true,
                    table: self.table.clone(),
                })
            }
            Err(err) => {
                warn!(
                    table = %self.table,
                    status = ?err.status,
                    error = %err,
                    "store rejected application"
                );
                Err(SubmissionError::from_store_message(err.message.as_deref()))
            }
        }
    }
}
