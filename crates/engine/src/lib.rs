//! Rule-based life insurance recommendation engine.
//!
//! This crate provides:
//! - MultiplierRule trait and implementations for the coverage multiplier
//! - MultiplierPipeline for composing rules
//! - Policy type and term length tables
//! - Summary and explanation text
//!
//! ## Architecture
//! A recommendation is computed in stages:
//! 1. Base coverage: the income figure times 12
//! 2. Multiplier: base 10 plus every rule's adjustment, capped at 20
//! 3. Coverage: base × multiplier, rounded to the nearest 1000
//! 4. Policy type and term length from the age/risk tables
//! 5. Summary and explanation text
//!
//! The engine holds no mutable state. It never fails for a validated profile
//! and assumes the caller has already run `UserProfile::validate`.
//!
//! ## Example Usage
//! ```ignore
//! use engine::RecommendationEngine;
//! use profile::{RiskTolerance, UserProfile};
//!
//! let engine = RecommendationEngine::new();
//! let recommendation = engine.compute(&UserProfile::new(25, 50_000.0, 0, RiskTolerance::Medium));
//! assert_eq!(recommendation.coverage_amount, 7_200_000);
//! ```

pub mod explanation;
pub mod multiplier;
pub mod policy;
pub mod rules;
pub mod traits;

use std::sync::Arc;

use profile::{Recommendation, UserProfile};
use rayon::prelude::*;
use tracing::debug;

// Re-export main types
pub use multiplier::{BASE_MULTIPLIER, MAX_MULTIPLIER, MultiplierPipeline};
pub use policy::{policy_type, term_years};
pub use traits::MultiplierRule;

/// The income figure is treated as monthly and annualised with this factor
pub const INCOME_PERIODS_PER_YEAR: f64 = 12.0;

/// Coverage amounts are rounded to this granularity
pub const COVERAGE_ROUNDING: f64 = 1000.0;

/// Income figure scaled to a year
pub fn base_coverage(profile: &UserProfile) -> f64 {
    profile.annual_income * INCOME_PERIODS_PER_YEAR
}

/// Round `base × multiplier` to the nearest 1000, halves rounding up.
///
/// Saturates at the largest multiple of 1000 a `u64` can hold.
pub fn coverage_amount(base_coverage: f64, multiplier: f64) -> u64 {
    let step = COVERAGE_ROUNDING as u64;
    let thousands = (base_coverage * multiplier / COVERAGE_ROUNDING).round().max(0.0) as u64;
    thousands.min(u64::MAX / step) * step
}

/// Computes recommendations from validated profiles.
///
/// Cheap to clone; clones share the same rule set.
#[derive(Clone)]
pub struct RecommendationEngine {
    multiplier: Arc<MultiplierPipeline>,
}

impl RecommendationEngine {
    /// Engine with the standard multiplier rules
    pub fn new() -> Self {
        Self::with_pipeline(MultiplierPipeline::standard())
    }

    pub fn with_pipeline(pipeline: MultiplierPipeline) -> Self {
        Self {
            multiplier: Arc::new(pipeline),
        }
    }

    /// Multiplier for a profile, after the cap
    pub fn multiplier(&self, profile: &UserProfile) -> f64 {
        self.multiplier.compute(profile)
    }

    /// Compute the recommendation for one profile.
    pub fn compute(&self, profile: &UserProfile) -> Recommendation {
        let base = base_coverage(profile);
        let multiplier = self.multiplier(profile);
        let coverage_amount = coverage_amount(base, multiplier);
        let policy_type = policy_type(profile.age, profile.risk_tolerance);
        let term_years = term_years(profile.age, profile.dependents);

        debug!(
            "age={} dependents={} risk={} multiplier={} coverage={} policy={:?} term={}",
            profile.age,
            profile.dependents,
            profile.risk_tolerance,
            multiplier,
            coverage_amount,
            policy_type,
            term_years
        );

        Recommendation {
            policy_type,
            coverage_amount,
            term_years,
            summary_text: explanation::summary_text(policy_type, coverage_amount, term_years),
            explanation_text: explanation::explanation_text(
                profile,
                policy_type,
                coverage_amount,
                term_years,
            ),
        }
    }

    /// Compute recommendations for many profiles in parallel.
    ///
    /// Output order matches input order.
    pub fn compute_batch(&self, profiles: &[UserProfile]) -> Vec<Recommendation> {
        profiles
            .par_iter()
            .map(|profile| self.compute(profile))
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile::{PolicyType, RiskTolerance};

    #[test]
    fn test_young_single_medium_risk() {
        let engine = RecommendationEngine::new();
        let profile = UserProfile::new(25, 50_000.0, 0, RiskTolerance::Medium);

        assert_eq!(base_coverage(&profile), 600_000.0);
        assert_eq!(engine.multiplier(&profile), 12.0);

        let rec = engine.compute(&profile);
        assert_eq!(rec.coverage_amount, 7_200_000);
        assert_eq!(rec.policy_type, PolicyType::TermLife);
        assert_eq!(rec.term_years, 20);
        assert_eq!(rec.summary_text, "Term Life – $7,200,000 for 20 years");
    }

    #[test]
    fn test_middle_aged_family_high_risk() {
        let engine = RecommendationEngine::new();
        let profile = UserProfile::new(45, 80_000.0, 2, RiskTolerance::High);

        assert_eq!(engine.multiplier(&profile), 14.0);

        let rec = engine.compute(&profile);
        assert_eq!(rec.coverage_amount, 13_440_000);
        assert_eq!(rec.policy_type, PolicyType::WholeLife);
        assert_eq!(rec.term_years, 10);
        assert_eq!(rec.summary_text, "Whole Life – $13,440,000 for 10 years");
    }

    #[test]
    fn test_coverage_rounding() {
        assert_eq!(coverage_amount(0.0, 12.0), 0);
        assert_eq!(coverage_amount(1_000.0, 10.5), 11_000); // 10.5 thousands, rounds up
        assert_eq!(coverage_amount(1_234.0, 1.0), 1_000);
        assert_eq!(coverage_amount(1_600.0, 1.0), 2_000);
    }

    #[test]
    fn test_coverage_saturates_for_huge_incomes() {
        let engine = RecommendationEngine::new();
        let ceiling = u64::MAX / 1000 * 1000;

        for income in [1e18, 1e300, f64::MAX] {
            let profile = UserProfile::new(25, income, 0, RiskTolerance::Medium)
                .validated()
                .unwrap();
            let rec = engine.compute(&profile);
            assert_eq!(rec.coverage_amount % 1000, 0, "income: {}", income);
            assert_eq!(rec.coverage_amount, ceiling, "income: {}", income);
        }
        assert_eq!(coverage_amount(f64::INFINITY, 20.0), ceiling);

        let large = UserProfile::new(25, 1e15, 0, RiskTolerance::Medium);
        assert_eq!(engine.compute(&large).coverage_amount, 144_000_000_000_000_000);
    }

    #[test]
    fn test_zero_income() {
        let engine = RecommendationEngine::new();
        let rec = engine.compute(&UserProfile::new(30, 0.0, 0, RiskTolerance::Low));
        assert_eq!(rec.coverage_amount, 0);
        assert!(rec.explanation_text.contains("$0 suggests a coverage amount of $0."));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let engine = RecommendationEngine::new();
        let profile = UserProfile::new(52, 73_456.78, 3, RiskTolerance::Low);

        assert_eq!(engine.compute(&profile), engine.compute(&profile));
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = RecommendationEngine::new();
        let profiles: Vec<UserProfile> = (18..=100)
            .map(|age| UserProfile::new(age, 40_000.0, age % 11, RiskTolerance::High))
            .collect();

        let batch = engine.compute_batch(&profiles);
        assert_eq!(batch.len(), profiles.len());
        for (profile, rec) in profiles.iter().zip(&batch) {
            assert_eq!(rec, &engine.compute(profile));
        }
    }
}
