//! The MultiplierPipeline sums rule adjustments into a coverage multiplier.
//!
//! This module provides the MultiplierPipeline struct that chains
//! multiplier rules together using the builder pattern.

use crate::rules::{AgeBandRule, DependentsRule, RiskToleranceRule};
use crate::traits::MultiplierRule;
use profile::UserProfile;
use tracing;

/// Starting multiplier before any rule applies
pub const BASE_MULTIPLIER: f64 = 10.0;

/// Upper bound on the final multiplier. There is no lower bound.
pub const MAX_MULTIPLIER: f64 = 20.0;

/// Chains multiplier rules on top of a base value, then caps the total.
///
/// ## Usage
/// ```ignore
/// let pipeline = MultiplierPipeline::new(10.0, 20.0)
///     .add_rule(AgeBandRule::standard())
///     .add_rule(DependentsRule::default())
///     .add_rule(RiskToleranceRule::default());
///
/// let multiplier = pipeline.compute(&profile);
/// ```
pub struct MultiplierPipeline {
    base: f64,
    cap: f64,
    rules: Vec<Box<dyn MultiplierRule>>,
}

impl MultiplierPipeline {
    /// Create a pipeline with no rules.
    pub fn new(base: f64, cap: f64) -> Self {
        Self {
            base,
            cap,
            rules: Vec::new(),
        }
    }

    /// Base 10, cap 20, with the age, dependents and risk tolerance rules
    pub fn standard() -> Self {
        Self::new(BASE_MULTIPLIER, MAX_MULTIPLIER)
            .add_rule(AgeBandRule::standard())
            .add_rule(DependentsRule::default())
            .add_rule(RiskToleranceRule::default())
    }

    /// Add a rule to the pipeline (builder pattern).
    pub fn add_rule(mut self, rule: impl MultiplierRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Sum every rule's adjustment onto the base and apply the cap.
    ///
    /// # Returns
    /// The multiplier, never above the cap
    pub fn compute(&self, profile: &UserProfile) -> f64 {
        let mut multiplier = self.base;
        for rule in &self.rules {
            let adjustment = rule.adjustment(profile);
            tracing::trace!("Rule {} adjusted multiplier by {}", rule.name(), adjustment);
            multiplier += adjustment;
        }
        multiplier.min(self.cap)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for MultiplierPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
