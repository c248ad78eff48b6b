//! Dependents component of the coverage multiplier.

use crate::traits::MultiplierRule;
use profile::UserProfile;

/// Adds a fixed step per dependent.
pub struct DependentsRule {
    per_dependent: f64,
}

impl DependentsRule {
    pub fn new(per_dependent: f64) -> Self {
        Self { per_dependent }
    }
}

impl Default for DependentsRule {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MultiplierRule for DependentsRule {
    fn name(&self) -> &str {
        "DependentsRule"
    }

    fn adjustment(&self, profile: &UserProfile) -> f64 {
        profile.dependents as f64 * self.per_dependent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile::RiskTolerance;

    #[test]
    fn test_half_step_per_dependent() {
        let rule = DependentsRule::default();
        let with = |dependents| UserProfile::new(40, 80_000.0, dependents, RiskTolerance::Low);

        assert_eq!(rule.adjustment(&with(0)), 0.0);
        assert_eq!(rule.adjustment(&with(1)), 0.5);
        assert_eq!(rule.adjustment(&with(10)), 5.0);
    }
}
