use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters exposed at `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    pub items_created: Arc<AtomicU64>,
    pub images_stored: Arc<AtomicU64>,
    pub image_fallbacks: Arc<AtomicU64>,
    pub searches: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            items_created: Arc::new(AtomicU64::new(0)),
            images_stored: Arc::new(AtomicU64::new(0)),
            image_fallbacks: Arc::new(AtomicU64::new(0)),
            searches: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_items_created(&self) {
        self.items_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_images_stored(&self) {
        self.images_stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_image_fallbacks(&self) {
        self.image_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_created: self.items_created.load(Ordering::Relaxed),
            images_stored: self.images_stored.load(Ordering::Relaxed),
            image_fallbacks: self.image_fallbacks.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub items_created: u64,
    pub images_stored: u64,
    pub image_fallbacks: u64,
    pub searches: u64,
    pub uptime_seconds: u64,
}
