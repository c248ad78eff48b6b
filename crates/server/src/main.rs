//! Simple test harness for the recommendation orchestrator.
//!
//! This binary runs a couple of sample applicants through the full
//! validate → compute → persist → record path and prints the resulting
//! health and metrics reports.

use anyhow::Result;
use tracing::info;
use tracing_subscriber;

use profile::{RiskTolerance, UserProfile};
use server::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,engine=debug,metrics=debug,storage=debug")
        .init();

    info!("Starting CoverRecs server test harness");

    let orchestrator = ServiceConfig::default().build();

    let applicants = [
        UserProfile::new(25, 50_000.0, 0, RiskTolerance::Medium),
        UserProfile::new(45, 80_000.0, 2, RiskTolerance::High),
        UserProfile::new(70, 30_000.0, 0, RiskTolerance::Low),
    ];

    for applicant in applicants {
        let submission = orchestrator
            .submit(applicant, Some("harness".to_string()))
            .await?;
        info!("{}", submission.recommendation.summary_text);
        info!("   {}", submission.recommendation.explanation_text);
    }

    let history = orchestrator.history("harness").await?;
    info!("Harness owns {} submissions", history.len());

    info!("Health: {}", serde_json::to_string_pretty(&orchestrator.health())?);
    info!("Ready: {}", serde_json::to_string_pretty(&orchestrator.readiness())?);
    info!("Metrics: {}", serde_json::to_string_pretty(&orchestrator.metrics_snapshot())?);

    Ok(())
}
