//! Multiplier rule implementations.
//!
//! This module contains the concrete rules that are composed into a
//! MultiplierPipeline.

pub mod age;
pub mod dependents;
pub mod risk_tolerance;

// Re-export for convenience
pub use age::{AgeBand, AgeBandRule, STANDARD_AGE_BANDS};
pub use dependents::DependentsRule;
pub use risk_tolerance::RiskToleranceRule;
