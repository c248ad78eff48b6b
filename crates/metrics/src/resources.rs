//! Host resource sampling.
//!
//! Readings are best-effort. A host that cannot report a figure yields
//! zeros instead of an error.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Memory and CPU figures at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    /// Bytes in use
    pub memory_used: u64,
    /// Bytes available in total
    pub memory_total: u64,
    /// Global CPU usage percentage (0-100)
    pub cpu_usage: f32,
}

impl ResourceUsage {
    /// `used / total × 100` rounded to 2 decimals, 0 when total is unknown
    pub fn memory_percentage(&self) -> f64 {
        if self.memory_total == 0 {
            return 0.0;
        }
        round2(self.memory_used as f64 / self.memory_total as f64 * 100.0)
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Source of resource readings for snapshots and health checks.
pub trait ResourceProbe: Send + Sync {
    fn sample(&self) -> ResourceUsage;
}

/// Reads memory and CPU from the operating system.
pub struct SystemProbe {
    system: Mutex<System>,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new_with_specifics(
                RefreshKind::nothing()
                    .with_cpu(CpuRefreshKind::everything())
                    .with_memory(MemoryRefreshKind::everything()),
            )),
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SystemProbe {
    fn sample(&self) -> ResourceUsage {
        let mut system = self.system.lock();
        system.refresh_memory();
        system.refresh_cpu_all();

        let cpu_usage = system.global_cpu_usage();
        ResourceUsage {
            memory_used: system.used_memory(),
            memory_total: system.total_memory(),
            cpu_usage: if cpu_usage.is_finite() { cpu_usage } else { 0.0 },
        }
    }
}

/// Always reports the same reading. Useful where the host cannot be queried.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe(pub ResourceUsage);

impl StaticProbe {
    /// Reading with the given memory figures and no CPU load
    pub fn memory(used: u64, total: u64) -> Self {
        Self(ResourceUsage {
            memory_used: used,
            memory_total: total,
            cpu_usage: 0.0,
        })
    }
}

impl ResourceProbe for StaticProbe {
    fn sample(&self) -> ResourceUsage {
        self.0
    }
}
