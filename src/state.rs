use std::sync::Arc;

use crate::config::AppConfig;
use crate::images::ImageStore;
use crate::metrics::Metrics;
use crate::repository::ItemRepository;

/// The shared application state.
///
/// Built once at startup and cloned into every handler by axum's `State`
/// extractor. Nothing in here is mutated per request except the atomic
/// metrics counters.
#[derive(Clone)]
pub struct AppState {
    /// Item persistence.
    pub items: Arc<dyn ItemRepository>,
    /// Image directory with placeholder fallback.
    pub images: Arc<ImageStore>,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemRepository>, config: AppConfig) -> Self {
        let images = ImageStore::from_config(&config.storage);
        Self {
            items,
            images: Arc::new(images),
            config: Arc::new(config),
            metrics: Metrics::new(),
        }
    }
}
