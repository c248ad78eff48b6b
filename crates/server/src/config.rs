//! Service wiring.
//!
//! Picks the storage backend and metrics settings, then assembles a
//! ready-to-use orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use metrics::{MetricsAggregator, MetricsConfig};
use storage::{InMemorySubmissionStore, JsonFileSubmissionStore, SubmissionStore};

use crate::orchestrator::RecommendationOrchestrator;

/// Where submissions are persisted
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    /// Lost when the process exits
    InMemory,
    /// Append-only JSON Lines file
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub store: StoreConfig,
    pub metrics: MetricsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::InMemory,
            metrics: MetricsConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Build an orchestrator whose metrics sample the host system
    pub fn build(&self) -> RecommendationOrchestrator {
        let metrics = Arc::new(MetricsAggregator::with_system_probe(self.metrics));
        RecommendationOrchestrator::new(self.build_store(), metrics)
    }

    pub fn build_store(&self) -> Arc<dyn SubmissionStore> {
        match &self.store {
            StoreConfig::InMemory => Arc::new(InMemorySubmissionStore::new()),
            StoreConfig::JsonFile(path) => Arc::new(JsonFileSubmissionStore::new(path.clone())),
        }
    }
}
