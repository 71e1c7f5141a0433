use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::application::domain::Application;
use crate::workflows::application::gateway::{
    ApplicationStore, StoreError, StoreGateway, StoreRow,
};
use crate::workflows::application::machine::ApplicationForm;

pub(super) fn complete_application() -> Application {
    Application {
        name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        age: "30".to_string(),
        country: "Nigeria".to_string(),
        state: "Lagos".to_string(),
        height: "6-1".to_string(),
        education: "masters".to_string(),
        occupation: "creative".to_string(),
        grammar_test: "youre".to_string(),
        can_cook: "yes-learning".to_string(),
        anatomy_knowledge: "yes-confident".to_string(),
        reliability: "never".to_string(),
        football_team: "man-united".to_string(),
        additional_info: String::new(),
    }
}

/// Fill every field through the state machine and walk to the last step.
pub(super) fn form_ready_to_submit() -> ApplicationForm {
    let application = complete_application();
    let mut form = ApplicationForm::new();
    for (field, value) in application.entries() {
        form.update_field(field, value);
    }
    while !form.is_last_step() {
        assert!(form.advance(), "step {} should validate", form.step());
    }
    form
}

pub(super) fn fill_step(form: &mut ApplicationForm, step: usize) {
    let application = complete_application();
    for field in crate::workflows::application::steps::required_fields(step) {
        form.update_field(field, application.value(field));
    }
}

/// Store double recording every insert and failing with queued errors first.
#[derive(Debug, Default)]
pub(super) struct RecordingStore {
    inserts: Mutex<Vec<(String, Vec<StoreRow>)>>,
    failures: Mutex<VecDeque<StoreError>>,
}

impl RecordingStore {
    pub(super) fn failing_with(errors: Vec<StoreError>) -> Self {
        Self {
            inserts: Mutex::new(Vec::new()),
            failures: Mutex::new(errors.into()),
        }
    }

    pub(super) fn inserts(&self) -> Vec<(String, Vec<StoreRow>)> {
        self.inserts.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationStore for RecordingStore {
    async fn insert(&self, table: &str, rows: Vec<StoreRow>) -> Result<(), StoreError> {
        self.inserts
            .lock()
            .expect("store mutex poisoned")
            .push((table.to_string(), rows));
        match self.failures.lock().expect("store mutex poisoned").pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub(super) fn recording_gateway(
    store: RecordingStore,
) -> (StoreGateway<RecordingStore>, Arc<RecordingStore>) {
    let store = Arc::new(store);
    (StoreGateway::new(store.clone()), store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// In-memory sink for formatted log lines, installed per test thread.
#[derive(Debug, Clone, Default)]
pub(super) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(super) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
