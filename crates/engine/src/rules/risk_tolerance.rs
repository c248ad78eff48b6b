//! Risk tolerance component of the coverage multiplier.
//!
//! Both ends of the scale raise coverage: cautious applicants want a safety
//! margin, risk-tolerant ones want a more comprehensive policy.

use crate::traits::MultiplierRule;
use profile::{RiskTolerance, UserProfile};

/// Looks up a fixed adjustment per tolerance level.
pub struct RiskToleranceRule {
    low: f64,
    medium: f64,
    high: f64,
}

impl RiskToleranceRule {
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }
}

impl Default for RiskToleranceRule {
    /// Low → +1, Medium → 0, High → +2
    fn default() -> Self {
        Self::new(1.0, 0.0, 2.0)
    }
}

impl MultiplierRule for RiskToleranceRule {
    fn name(&self) -> &str {
        "RiskToleranceRule"
    }

    fn adjustment(&self, profile: &UserProfile) -> f64 {
        match profile.risk_tolerance {
            RiskTolerance::Low => self.low,
            RiskTolerance::Medium => self.medium,
            RiskTolerance::High => self.high,
        }
    }
}
