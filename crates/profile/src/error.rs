//! Error types for the profile crate.
//!
//! Only the validation layer produces errors here. Once a profile has
//! passed validation, nothing downstream is expected to fail on it.

use thiserror::Error;

/// Reasons a submitted profile is rejected before it reaches the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Age outside the insurable range
    #[error("Age must be between {min} and {max}, got {age}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    /// Too many dependents declared
    #[error("Dependents must be between {min} and {max}, got {dependents}")]
    DependentsOutOfRange { dependents: u32, min: u32, max: u32 },

    /// Income is negative, NaN or infinite
    #[error("Annual income must be a non-negative number, got {value}")]
    InvalidIncome { value: f64 },

    /// A field could not be parsed into its domain type
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ProfileError>;
