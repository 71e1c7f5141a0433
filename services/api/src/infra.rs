use application_form::config::StoreConfig;
use application_form::error::AppError;
use application_form::workflows::application::{
    ApplicationStore, PostgrestStore, SharedGateway, StoreError, StoreGateway, StoreRow,
};
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the hosted store.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    rows: Arc<Mutex<Vec<(String, StoreRow)>>>,
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn insert(&self, table: &str, rows: Vec<StoreRow>) -> Result<(), StoreError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|_| StoreError::rejected("in-memory store is unavailable"))?;
        guard.extend(rows.into_iter().map(|row| (table.to_string(), row)));
        Ok(())
    }
}

impl InMemoryApplicationStore {
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn rows(&self) -> Vec<(String, StoreRow)> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn memory_gateway(table: &str) -> SharedGateway {
    let store = Arc::new(InMemoryApplicationStore::default());
    Arc::new(StoreGateway::with_table(store, table))
}

/// Hosted store when configured, otherwise an in-memory one.
pub(crate) fn build_gateway(config: &StoreConfig) -> Result<SharedGateway, AppError> {
    match PostgrestStore::from_config(config)? {
        Some(store) => {
            info!(table = %config.table, "using hosted application store");
            Ok(Arc::new(StoreGateway::with_table(
                Arc::new(store),
                config.table.clone(),
            )))
        }
        None => {
            warn!("SUPABASE_URL not set; applications are kept in memory only");
            Ok(memory_gateway(&config.table))
        }
    }
}
