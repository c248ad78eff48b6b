//! # Metrics Aggregator
//!
//! Process-lifetime request counters plus a rolling response-time window.
//!
//! ## Concurrency
//! All counters and the window live in one struct behind a single
//! `parking_lot::Mutex`. `record_request` updates everything under one lock
//! acquisition and `snapshot` reads everything under one, so a reader can
//! never see `successful + failed != total`.
//!
//! Host resource sampling happens outside the lock.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::health::{HealthReport, ReadinessReport};
use crate::resources::{ResourceProbe, ResourceUsage, SystemProbe};
use crate::window::ResponseTimeWindow;

/// Number of recent response times kept for the average
pub const DEFAULT_WINDOW_CAPACITY: usize = 1000;

/// Memory usage percentage at which the process turns unhealthy
pub const DEFAULT_MEMORY_THRESHOLD_PERCENT: f64 = 90.0;

/// Tunables for the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    pub window_capacity: usize,
    pub memory_threshold_percent: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            memory_threshold_percent: DEFAULT_MEMORY_THRESHOLD_PERCENT,
        }
    }
}

/// Request counters at one instant. Always `successful + failed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCounts {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
}

/// Full metrics view, recomputed on every call to `snapshot`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Mean over the rolling window, 0 when no request has completed yet
    pub average_response_time_ms: f64,
    /// Samples currently in the window
    pub window_size: usize,
    pub uptime_ms: u64,
    #[serde(flatten)]
    pub resources: ResourceUsage,
}

#[derive(Debug)]
struct AggregatorState {
    counts: RequestCounts,
    window: ResponseTimeWindow,
}

/// Shared, thread-safe metrics sink.
///
/// Wrap in an `Arc` and hand a clone to every request handler.
pub struct MetricsAggregator {
    state: Mutex<AggregatorState>,
    started_at: Instant,
    probe: Arc<dyn ResourceProbe>,
    config: MetricsConfig,
}

impl MetricsAggregator {
    /// Create an aggregator that samples the given probe.
    ///
    /// # Arguments
    /// * `config` - Window capacity and health threshold
    /// * `probe` - Source of memory/CPU readings
    pub fn new(config: MetricsConfig, probe: Arc<dyn ResourceProbe>) -> Self {
        Self {
            state: Mutex::new(AggregatorState {
                counts: RequestCounts::default(),
                window: ResponseTimeWindow::new(config.window_capacity),
            }),
            started_at: Instant::now(),
            probe,
            config,
        }
    }

    /// Aggregator reading memory and CPU from the operating system
    pub fn with_system_probe(config: MetricsConfig) -> Self {
        Self::new(config, Arc::new(SystemProbe::new()))
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Record one completed request.
    ///
    /// # Arguments
    /// * `success` - Whether the request succeeded
    /// * `response_time_ms` - Wall time the request took
    pub fn record_request(&self, success: bool, response_time_ms: f64) {
        let mut state = self.state.lock();
        state.counts.total += 1;
        if success {
            state.counts.successful += 1;
        } else {
            state.counts.failed += 1;
        }
        state.window.push(response_time_ms);
    }

    /// Current counters
    pub fn counts(&self) -> RequestCounts {
        self.state.lock().counts
    }

    pub fn uptime_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Consistent view of counters, window average, uptime and host resources.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let (counts, average, window_size) = {
            let state = self.state.lock();
            (state.counts, state.window.average(), state.window.len())
        };
        let resources = self.probe.sample();

        debug!(
            "Metrics snapshot: total={} ok={} failed={} avg_ms={:.2}",
            counts.total, counts.successful, counts.failed, average
        );

        MetricsSnapshot {
            total_requests: counts.total,
            successful_requests: counts.successful,
            failed_requests: counts.failed,
            average_response_time_ms: average,
            window_size,
            uptime_ms: self.uptime_ms(),
            resources,
        }
    }

    /// Health report; unhealthy once memory reaches the configured threshold.
    pub fn health(&self) -> HealthReport {
        let counts = self.counts();
        let usage = self.probe.sample();
        HealthReport::new(
            counts,
            self.uptime_ms(),
            &usage,
            self.config.memory_threshold_percent,
        )
    }

    /// Readiness report; ready only while healthy and under the threshold.
    pub fn readiness(&self) -> ReadinessReport {
        ReadinessReport::from_health(&self.health(), self.config.memory_threshold_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{HealthStatus, ReadinessStatus};
    use crate::resources::StaticProbe;

    fn aggregator_with_memory(used: u64, total: u64) -> MetricsAggregator {
        MetricsAggregator::new(
            MetricsConfig::default(),
            Arc::new(StaticProbe::memory(used, total)),
        )
    }

    #[test]
    fn test_fresh_aggregator() {
        let aggregator = aggregator_with_memory(10, 100);
        let snapshot = aggregator.snapshot();

        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.successful_requests, 0);
        assert_eq!(snapshot.failed_requests, 0);
        assert_eq!(snapshot.average_response_time_ms, 0.0);
        assert_eq!(snapshot.window_size, 0);
    }

    #[test]
    fn test_record_success_and_failure() {
        let aggregator = aggregator_with_memory(10, 100);
        aggregator.record_request(true, 10.0);
        aggregator.record_request(true, 20.0);
        aggregator.record_request(false, 60.0);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.successful_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.average_response_time_ms, 30.0);
        assert_eq!(snapshot.window_size, 3);
    }

    #[test]
    fn test_window_keeps_only_most_recent_samples() {
        let aggregator = aggregator_with_memory(10, 100);
        for _ in 0..500 {
            aggregator.record_request(true, 1000.0);
        }
        for _ in 0..1000 {
            aggregator.record_request(true, 2.0);
        }

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.total_requests, 1500);
        assert_eq!(snapshot.window_size, 1000);
        assert_eq!(snapshot.average_response_time_ms, 2.0);
    }

    #[test]
    fn test_nan_response_time_keeps_average_finite() {
        let aggregator = aggregator_with_memory(10, 100);
        aggregator.record_request(true, f64::NAN);
        aggregator.record_request(false, 6.0);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.average_response_time_ms, 3.0);
    }

    #[test]
    fn test_snapshot_passes_resources_through() {
        let aggregator = aggregator_with_memory(256, 1024);
        let snapshot = aggregator.snapshot();

        assert_eq!(snapshot.resources.memory_used, 256);
        assert_eq!(snapshot.resources.memory_total, 1024);
    }

    #[test]
    fn test_health_and_readiness_under_memory_pressure() {
        let aggregator = aggregator_with_memory(95, 100);
        aggregator.record_request(true, 5.0);

        let health = aggregator.health();
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.memory.percentage, 95.0);
        assert_eq!(health.requests.total, 1);
        assert_eq!(health.requests.success_rate, 100.0);

        assert_eq!(aggregator.readiness().status, ReadinessStatus::NotReady);
    }

    #[test]
    fn test_custom_threshold() {
        let aggregator = MetricsAggregator::new(
            MetricsConfig {
                window_capacity: 10,
                memory_threshold_percent: 50.0,
            },
            Arc::new(StaticProbe::memory(60, 100)),
        );

        assert!(!aggregator.health().is_healthy());
        assert!(!aggregator.readiness().is_ready());
    }

    #[test]
    fn test_unknown_memory_is_healthy() {
        let aggregator = MetricsAggregator::new(MetricsConfig::default(), Arc::new(StaticProbe::default()));

        assert!(aggregator.health().is_healthy());
        assert!(aggregator.readiness().is_ready());
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let aggregator = aggregator_with_memory(1, 2);
        aggregator.record_request(false, 4.0);

        let json = serde_json::to_value(aggregator.snapshot()).unwrap();
        assert_eq!(json["totalRequests"], 1);
        assert_eq!(json["failedRequests"], 1);
        assert_eq!(json["averageResponseTimeMs"], 4.0);
        assert_eq!(json["memoryUsed"], 1);
        assert_eq!(json["memoryTotal"], 2);
        assert!(json["uptimeMs"].is_u64());
    }
}
