//! Core traits for the coverage multiplier.
//!
//! Each adjustment to the coverage multiplier is a separate rule so that
//! every boundary can be tested on its own and the rule set can be
//! reassembled without touching the engine.

use profile::UserProfile;

/// A single additive adjustment to the coverage multiplier.
///
/// `Send + Sync` lets one rule set be shared by every concurrent caller.
pub trait MultiplierRule: Send + Sync {
    /// Returns the name of this rule (for logging/debugging)
    fn name(&self) -> &str;

    /// Amount this rule adds to (or removes from) the multiplier
    fn adjustment(&self, profile: &UserProfile) -> f64;
}
