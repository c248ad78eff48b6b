//! Age component of the coverage multiplier.
//!
//! Younger applicants get a larger multiplier since they have more
//! earning years left to protect.

use crate::traits::MultiplierRule;
use profile::UserProfile;

/// One row of the age table: applies while `age < below`, or always when
/// `below` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeBand {
    pub below: Option<u32>,
    pub adjustment: f64,
}

/// Standard table: under 30 → +2, 30 to 49 → +1, 50 and over → -1
pub const STANDARD_AGE_BANDS: [AgeBand; 3] = [
    AgeBand { below: Some(30), adjustment: 2.0 },
    AgeBand { below: Some(50), adjustment: 1.0 },
    AgeBand { below: None, adjustment: -1.0 },
];

/// Picks the first band whose upper bound lies above the applicant's age.
///
/// ## Algorithm
/// Bands are checked in order, so they must be sorted by `below`. The
/// final band should be open-ended; if none match, the adjustment is 0.
pub struct AgeBandRule {
    bands: Vec<AgeBand>,
}

impl AgeBandRule {
    pub fn new(bands: impl Into<Vec<AgeBand>>) -> Self {
        Self { bands: bands.into() }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_AGE_BANDS)
    }
}

impl MultiplierRule for AgeBandRule {
    fn name(&self) -> &str {
        "AgeBandRule"
    }

    fn adjustment(&self, profile: &UserProfile) -> f64 {
        self.bands
            .iter()
            .find(|band| band.below.is_none_or(|below| profile.age < below))
            .map(|band| band.adjustment)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile::RiskTolerance;

    fn at_age(age: u32) -> UserProfile {
        UserProfile::new(age, 50_000.0, 0, RiskTolerance::Medium)
    }

    #[test]
    fn test_age_band_boundaries() {
        let rule = AgeBandRule::standard();

        assert_eq!(rule.adjustment(&at_age(18)), 2.0);
        assert_eq!(rule.adjustment(&at_age(29)), 2.0);
        assert_eq!(rule.adjustment(&at_age(30)), 1.0);
        assert_eq!(rule.adjustment(&at_age(49)), 1.0);
        assert_eq!(rule.adjustment(&at_age(50)), -1.0);
        assert_eq!(rule.adjustment(&at_age(100)), -1.0);
    }

    #[test]
    fn test_no_matching_band() {
        let rule = AgeBandRule::new(vec![AgeBand { below: Some(30), adjustment: 2.0 }]);
        assert_eq!(rule.adjustment(&at_age(40)), 0.0);
    }
}
