//! Core domain types for insurance recommendations.
//!
//! Every type here is an immutable value: a profile comes in with a request,
//! a recommendation is derived from it, and a submission ties both together
//! once it has been persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProfileError;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of the authenticated user that owns a submission
pub type OwnerId = String;

/// Unique identifier assigned to a submission when it is created
pub type SubmissionId = Uuid;

// =============================================================================
// Input Types
// =============================================================================

/// How much financial risk the applicant is comfortable with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Low => "Low",
            RiskTolerance::Medium => "Medium",
            RiskTolerance::High => "High",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = ProfileError;

    /// Accepts the wire spelling (`Low`, `Medium`, `High`), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTolerance::Low),
            "medium" => Ok(RiskTolerance::Medium),
            "high" => Ok(RiskTolerance::High),
            _ => Err(ProfileError::InvalidValue {
                field: "riskTolerance".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Financial profile submitted by an applicant.
///
/// Field names follow the JSON wire format (`annualIncome`, `riskTolerance`).
/// The older `income` spelling is accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Applicant age in years (18-100)
    pub age: u32,
    /// Income figure supplied by the applicant (>= 0)
    #[serde(alias = "income")]
    pub annual_income: f64,
    /// Number of people financially dependent on the applicant (0-10)
    pub dependents: u32,
    pub risk_tolerance: RiskTolerance,
}

impl UserProfile {
    pub fn new(age: u32, annual_income: f64, dependents: u32, risk_tolerance: RiskTolerance) -> Self {
        Self {
            age,
            annual_income,
            dependents,
            risk_tolerance,
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Kind of life insurance policy being recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    TermLife,
    WholeLife,
}

impl PolicyType {
    /// Human-readable label used in summary and explanation text
    pub fn label(&self) -> &'static str {
        match self {
            PolicyType::TermLife => "Term Life",
            PolicyType::WholeLife => "Whole Life",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommendation derived from a single profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub policy_type: PolicyType,
    /// Insured amount, always a multiple of 1000
    pub coverage_amount: u64,
    /// Policy term in years.
    ///
    /// Signed on purpose: applicants without dependents aged 65 or more get
    /// a zero or negative term from the age formula, and that value is
    /// carried through unchanged.
    pub term_years: i32,
    /// e.g. "Term Life – $7,200,000 for 20 years"
    pub summary_text: String,
    pub explanation_text: String,
}

/// Shape returned to the submitter: summary plus explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
    pub explanation: String,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            recommendation: recommendation.summary_text.clone(),
            explanation: recommendation.explanation_text.clone(),
        }
    }
}

// =============================================================================
// Persisted Record
// =============================================================================

/// A persisted profile together with the recommendation it produced.
///
/// Created once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub profile: UserProfile,
    pub recommendation: Recommendation,
    pub owner_id: Option<OwnerId>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Stamp a new submission with a fresh id and the current time
    pub fn new(
        profile: UserProfile,
        recommendation: Recommendation,
        owner_id: Option<OwnerId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            recommendation,
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id.as_deref() == Some(owner_id)
    }
}
