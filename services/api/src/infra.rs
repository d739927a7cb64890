use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use club_registry::config::StorageConfig;
use club_registry::registry::RegistryService;
use club_registry::storage::JsonFileStore;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The durable registry service used by `serve`, `stats`, and `export`:
/// collections live as JSON files under the configured data directory.
pub(crate) fn file_backed_service(config: &StorageConfig) -> Arc<RegistryService<JsonFileStore>> {
    Arc::new(RegistryService::new(Arc::new(JsonFileStore::new(
        &config.data_dir,
    ))))
}
