//! # Metrics Crate
//!
//! Request telemetry and health checks for the recommendation service.
//!
//! ## Components
//!
//! - **aggregator**: `MetricsAggregator`, the single owner of all counters
//! - **window**: bounded FIFO of recent response times
//! - **resources**: host memory/CPU sampling behind the `ResourceProbe` trait
//! - **health**: health and readiness reports derived from a snapshot
//! - **uptime**: `2d 3h 5m 10s` formatting
//!
//! Nothing in this crate returns an error. Telemetry is best-effort and must
//! never fail the request it is measuring.
//!
//! ## Example Usage
//!
//! ```ignore
//! use metrics::{MetricsAggregator, MetricsConfig};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(MetricsAggregator::with_system_probe(MetricsConfig::default()));
//! metrics.record_request(true, 12.5);
//! let snapshot = metrics.snapshot();
//! ```

pub mod aggregator;
pub mod health;
pub mod resources;
pub mod uptime;
pub mod window;

pub use aggregator::{MetricsAggregator, MetricsConfig, MetricsSnapshot, RequestCounts};
pub use health::{HealthReport, HealthStatus, ReadinessReport, ReadinessStatus};
pub use resources::{ResourceProbe, ResourceUsage, StaticProbe, SystemProbe};
pub use uptime::format_uptime;
pub use window::ResponseTimeWindow;
