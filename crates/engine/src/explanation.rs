//! Summary and explanation text.
//!
//! Output is a pure function of its inputs: same profile, same text, byte for
//! byte. Sentences are always emitted in this order:
//! 1. age and policy type
//! 2. dependents (only when there are any)
//! 3. income and coverage
//! 4. risk tolerance (only for Low or High)
//! 5. term length

use profile::{PolicyType, RiskTolerance, UserProfile};

/// One-line summary, e.g. `Term Life – $7,200,000 for 20 years`
pub fn summary_text(policy_type: PolicyType, coverage_amount: u64, term_years: i32) -> String {
    format!(
        "{} – ${} for {} years",
        policy_type.label(),
        group_thousands(coverage_amount),
        term_years
    )
}

/// Full justification for a recommendation, sentences joined by single spaces
pub fn explanation_text(
    profile: &UserProfile,
    policy_type: PolicyType,
    coverage_amount: u64,
    term_years: i32,
) -> String {
    let mut sentences: Vec<String> = Vec::with_capacity(5);

    sentences.push(format!(
        "Based on your age of {}, we recommend {} insurance.",
        profile.age,
        policy_type.label()
    ));

    if profile.dependents > 0 {
        let plural = if profile.dependents > 1 { "s" } else { "" };
        sentences.push(format!(
            "With {} dependent{}, you need sufficient coverage to protect your family's financial future.",
            profile.dependents, plural
        ));
    }

    sentences.push(format!(
        "Your annual income of ${} suggests a coverage amount of ${}.",
        format_amount(profile.annual_income),
        group_thousands(coverage_amount)
    ));

    match profile.risk_tolerance {
        RiskTolerance::High => sentences.push(
            "Given your high risk tolerance, we recommend a more comprehensive policy.".to_string(),
        ),
        RiskTolerance::Low => sentences.push(
            "With your low risk tolerance, we suggest a conservative but adequate coverage level."
                .to_string(),
        ),
        RiskTolerance::Medium => {}
    }

    sentences.push(format!(
        "This {}-year policy will provide financial security for your loved ones.",
        term_years
    ));

    sentences.join(" ")
}

/// Insert `,` every three digits: 7200000 → "7,200,000"
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Grouped whole part plus at most three fraction digits, trailing zeros dropped.
///
/// 50000 → "50,000", 1234.5 → "1,234.5", 0.1234 → "0.123"
pub fn format_amount(value: f64) -> String {
    let value = value.max(0.0);
    let mut whole = value.trunc();
    let mut thousandths = (value.fract() * 1000.0).round();
    if thousandths >= 1000.0 {
        whole += 1.0;
        thousandths = 0.0;
    }

    let grouped = group_digits(&format!("{:.0}", whole));
    let fraction = format!("{:03}", thousandths as u32);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, fraction)
    }
}
