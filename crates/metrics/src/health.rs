//! Health and readiness reports.
//!
//! Both probes currently use the same memory threshold. They are kept as
//! separate reports so the readiness rule can diverge later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::RequestCounts;
use crate::resources::{ResourceUsage, round2};
use crate::uptime::format_uptime;

/// Overall health derived from memory pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    /// Healthy while memory usage stays strictly below the threshold
    pub fn from_memory(percentage: f64, threshold_percent: f64) -> Self {
        if percentage < threshold_percent {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Whether the process should receive traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessStatus {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "not ready")]
    NotReady,
}

impl std::fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadinessStatus::Ready => write!(f, "ready"),
            ReadinessStatus::NotReady => write!(f, "not ready"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeReport {
    /// Milliseconds since the aggregator started
    pub value: u64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryReport {
    pub used: u64,
    pub total: u64,
    /// Rounded to 2 decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestReport {
    pub total: u64,
    /// Percentage of successful requests, 100 when nothing has been served yet
    pub success_rate: f64,
}

/// `{status, timestamp, uptime:{value,formatted}, memory:{used,total,percentage}, requests:{total,successRate}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime: UptimeReport,
    pub memory: MemoryReport,
    pub requests: RequestReport,
}

impl HealthReport {
    pub fn new(
        counts: RequestCounts,
        uptime_ms: u64,
        usage: &ResourceUsage,
        memory_threshold_percent: f64,
    ) -> Self {
        let percentage = usage.memory_percentage();
        Self {
            status: HealthStatus::from_memory(percentage, memory_threshold_percent),
            timestamp: Utc::now(),
            uptime: UptimeReport {
                value: uptime_ms,
                formatted: format_uptime(uptime_ms),
            },
            memory: MemoryReport {
                used: usage.memory_used,
                total: usage.memory_total,
                percentage,
            },
            requests: RequestReport {
                total: counts.total,
                success_rate: success_rate(counts),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// `successful / total × 100`, rounded to 2 decimals
pub fn success_rate(counts: RequestCounts) -> f64 {
    if counts.total == 0 {
        return 100.0;
    }
    round2(counts.successful as f64 / counts.total as f64 * 100.0)
}

/// `{status, timestamp}` where status is "ready" or "not ready"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub status: ReadinessStatus,
    pub timestamp: DateTime<Utc>,
}

impl ReadinessReport {
    /// Ready when healthy and memory is below the threshold
    pub fn from_health(health: &HealthReport, memory_threshold_percent: f64) -> Self {
        let ready = health.is_healthy() && health.memory.percentage < memory_threshold_percent;
        Self {
            status: if ready {
                ReadinessStatus::Ready
            } else {
                ReadinessStatus::NotReady
            },
            timestamp: health.timestamp,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}
