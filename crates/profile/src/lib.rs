//! # Profile Crate
//!
//! Domain types shared by every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **types**: `UserProfile` (input), `Recommendation` (output), `Submission` (persisted record)
//! - **validation**: range checks applied before a profile reaches the engine
//! - **error**: Error types for rejected profiles
//!
//! ## Example Usage
//!
//! ```ignore
//! use profile::{RiskTolerance, UserProfile};
//!
//! let profile = UserProfile::new(25, 50_000.0, 0, RiskTolerance::Medium).validated()?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::{ProfileError, Result};
pub use types::{
    OwnerId,
    PolicyType,
    Recommendation,
    RecommendationResponse,
    RiskTolerance,
    Submission,
    SubmissionId,
    UserProfile,
};
pub use validation::{AGE_RANGE, DEPENDENTS_RANGE};
