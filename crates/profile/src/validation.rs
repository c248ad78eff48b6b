//! Upstream validation for incoming profiles.
//!
//! The recommendation engine assumes every profile it sees is already in
//! range. This module is the gate that makes that assumption hold.

use std::ops::RangeInclusive;

use crate::error::{ProfileError, Result};
use crate::types::UserProfile;

/// Insurable ages, inclusive
pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;

/// Accepted number of dependents, inclusive
pub const DEPENDENTS_RANGE: RangeInclusive<u32> = 0..=10;

impl UserProfile {
    /// Check every field against its allowed range.
    ///
    /// Fields are checked in declaration order and the first violation is
    /// returned.
    pub fn validate(&self) -> Result<()> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(ProfileError::AgeOutOfRange {
                age: self.age,
                min: *AGE_RANGE.start(),
                max: *AGE_RANGE.end(),
            });
        }

        if !self.annual_income.is_finite() || self.annual_income < 0.0 {
            return Err(ProfileError::InvalidIncome {
                value: self.annual_income,
            });
        }

        if !DEPENDENTS_RANGE.contains(&self.dependents) {
            return Err(ProfileError::DependentsOutOfRange {
                dependents: self.dependents,
                min: *DEPENDENTS_RANGE.start(),
                max: *DEPENDENTS_RANGE.end(),
            });
        }

        Ok(())
    }

    /// Consume the profile, returning it only if it passes validation
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
