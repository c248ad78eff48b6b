//! Policy type and term length rules.

use profile::{PolicyType, RiskTolerance};

/// One row of the policy table.
///
/// Applies while `age < below` (or always when `below` is `None`). Inside the
/// band, `high_risk` is chosen for High tolerance and `default` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyBand {
    pub below: Option<u32>,
    pub default: PolicyType,
    pub high_risk: PolicyType,
}

/// Under 40 → Term; 40 to 59 → Whole for High tolerance, else Term; 60+ → Whole
pub const POLICY_BANDS: [PolicyBand; 3] = [
    PolicyBand {
        below: Some(40),
        default: PolicyType::TermLife,
        high_risk: PolicyType::TermLife,
    },
    PolicyBand {
        below: Some(60),
        default: PolicyType::TermLife,
        high_risk: PolicyType::WholeLife,
    },
    PolicyBand {
        below: None,
        default: PolicyType::WholeLife,
        high_risk: PolicyType::WholeLife,
    },
];

/// Pick the policy type for an applicant.
pub fn policy_type(age: u32, risk_tolerance: RiskTolerance) -> PolicyType {
    let band = POLICY_BANDS
        .iter()
        .copied()
        .find(|band| band.below.is_none_or(|below| age < below))
        .unwrap_or(POLICY_BANDS[POLICY_BANDS.len() - 1]);

    match risk_tolerance {
        RiskTolerance::High => band.high_risk,
        RiskTolerance::Low | RiskTolerance::Medium => band.default,
    }
}

/// Age the youngest dependent should reach before cover ends
const DEPENDENT_HORIZON_AGE: i32 = 25;
const MIN_TERM_WITH_DEPENDENTS: i32 = 10;
const MAX_TERM_WITH_DEPENDENTS: i32 = 30;
const RETIREMENT_AGE: i32 = 65;
const MAX_TERM_WITHOUT_DEPENDENTS: i32 = 20;

/// Term length in years.
///
/// With dependents: cover until the youngest would turn 25, within 10..=30.
/// Without: cover until 65, at most 20 years. That second branch is not
/// floored, so applicants aged 65 or more get 0 or a negative term.
pub fn term_years(age: u32, dependents: u32) -> i32 {
    let age = age as i32;
    if dependents > 0 {
        (DEPENDENT_HORIZON_AGE - (age - DEPENDENT_HORIZON_AGE))
            .clamp(MIN_TERM_WITH_DEPENDENTS, MAX_TERM_WITH_DEPENDENTS)
    } else {
        (RETIREMENT_AGE - age).min(MAX_TERM_WITHOUT_DEPENDENTS)
    }
}
