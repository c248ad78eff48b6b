//! # Recommendation Orchestrator
//!
//! This module coordinates a recommendation request:
//! 1. Validate the incoming profile
//! 2. Compute the recommendation
//! 3. Persist the submission
//! 4. Report outcome and latency to the metrics aggregator
//!
//! Every public operation, including the health and metrics reads, is
//! timed and recorded in the aggregator once it completes, whether it
//! succeeded or not.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use engine::RecommendationEngine;
use metrics::{HealthReport, MetricsAggregator, MetricsSnapshot, ReadinessReport};
use profile::{OwnerId, Submission, UserProfile};
use storage::SubmissionStore;

/// Main orchestrator that ties the engine, storage and metrics together
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    engine: RecommendationEngine,
    store: Arc<dyn SubmissionStore>,
    metrics: Arc<MetricsAggregator>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with the standard engine
    ///
    /// # Arguments
    /// * `store` - Where submissions are persisted
    /// * `metrics` - Shared aggregator every operation reports into
    pub fn new(store: Arc<dyn SubmissionStore>, metrics: Arc<MetricsAggregator>) -> Self {
        Self {
            engine: RecommendationEngine::new(),
            store,
            metrics,
        }
    }

    /// Swap in a differently configured engine
    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn metrics(&self) -> &Arc<MetricsAggregator> {
        &self.metrics
    }

    /// Main entry point: recommend coverage for one applicant
    ///
    /// # Arguments
    /// * `profile` - Applicant profile, validated here before computing
    /// * `owner_id` - Authenticated user the submission belongs to, if any
    ///
    /// # Returns
    /// The persisted submission with its recommendation
    pub async fn submit(&self, profile: UserProfile, owner_id: Option<OwnerId>) -> Result<Submission> {
        self.instrument("submit", async {
            let profile = profile.validated().context("Invalid profile")?;
            let recommendation = self.engine.compute(&profile);
            info!(
                "Recommended {} for age {} ({} dependents)",
                recommendation.summary_text, profile.age, profile.dependents
            );

            self.store
                .create(Submission::new(profile, recommendation, owner_id))
                .await
                .context("Failed to persist submission")
        })
        .await
    }

    /// Recommend coverage for many applicants at once
    ///
    /// All profiles are validated up front; one bad profile rejects the whole
    /// batch before anything is computed or stored. Computation runs on the
    /// blocking pool since it is CPU-bound.
    pub async fn submit_batch(
        &self,
        profiles: Vec<UserProfile>,
        owner_id: Option<OwnerId>,
    ) -> Result<Vec<Submission>> {
        self.instrument("submit_batch", async {
            for (index, profile) in profiles.iter().enumerate() {
                profile
                    .validate()
                    .with_context(|| format!("Invalid profile at index {}", index))?;
            }

            let engine = self.engine.clone();
            let (profiles, recommendations) = tokio::task::spawn_blocking(move || {
                let recommendations = engine.compute_batch(&profiles);
                (profiles, recommendations)
            })
            .await
            .context("Batch computation task panicked")?;

            let mut stored = Vec::with_capacity(profiles.len());
            for (profile, recommendation) in profiles.into_iter().zip(recommendations) {
                let submission = Submission::new(profile, recommendation, owner_id.clone());
                stored.push(
                    self.store
                        .create(submission)
                        .await
                        .context("Failed to persist submission")?,
                );
            }
            info!("Stored {} batch submissions", stored.len());
            Ok(stored)
        })
        .await
    }

    /// Submissions made by one owner, newest first
    pub async fn history(&self, owner_id: &str) -> Result<Vec<Submission>> {
        self.instrument("history", async {
            self.store
                .find_by_owner(owner_id)
                .await
                .with_context(|| format!("Failed to load history for {}", owner_id))
        })
        .await
    }

    /// Every submission, newest first
    pub async fn all_submissions(&self) -> Result<Vec<Submission>> {
        self.instrument("all_submissions", async {
            self.store
                .find_all()
                .await
                .context("Failed to load submissions")
        })
        .await
    }

    /// Health report (`healthy` / `unhealthy`)
    pub fn health(&self) -> HealthReport {
        self.observe("health", || {
            let health = self.metrics.health();
            info!("Health check requested - Status: {}", health.status);
            health
        })
    }

    /// Readiness report (`ready` / `not ready`)
    pub fn readiness(&self) -> ReadinessReport {
        self.observe("readiness", || {
            let readiness = self.metrics.readiness();
            info!("Readiness check - Ready: {}", readiness.is_ready());
            readiness
        })
    }

    /// Full metrics snapshot
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.observe("metrics", || self.metrics.snapshot())
    }

    /// Time an async operation and record its outcome
    async fn instrument<T>(
        &self,
        operation: &str,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let start = Instant::now();
        let result = work.await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.metrics.record_request(result.is_ok(), elapsed_ms);
        match &result {
            Ok(_) => info!("{} completed in {:.2}ms", operation, elapsed_ms),
            Err(e) => warn!("{} failed after {:.2}ms: {:#}", operation, elapsed_ms, e),
        }
        result
    }

    /// Time an infallible operation and record it as a success
    fn observe<T>(&self, operation: &str, work: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = work();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.metrics.record_request(true, elapsed_ms);
        info!("{} completed in {:.2}ms", operation, elapsed_ms);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use metrics::{HealthStatus, MetricsConfig, ReadinessStatus, StaticProbe};
    use profile::{PolicyType, ProfileError, RiskTolerance};
    use storage::{InMemorySubmissionStore, JsonFileSubmissionStore, StoreError};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Store that rejects every operation
    struct FailingStore;

    #[async_trait]
    impl SubmissionStore for FailingStore {
        fn name(&self) -> &str {
            "FailingStore"
        }

        async fn create(&self, _submission: Submission) -> storage::Result<Submission> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn find_all(&self) -> storage::Result<Vec<Submission>> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn find_by_owner(&self, _owner_id: &str) -> storage::Result<Vec<Submission>> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn metrics_with_memory(used: u64, total: u64) -> Arc<MetricsAggregator> {
        Arc::new(MetricsAggregator::new(
            MetricsConfig::default(),
            Arc::new(StaticProbe::memory(used, total)),
        ))
    }

    fn build_test_orchestrator() -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(
            Arc::new(InMemorySubmissionStore::new()),
            metrics_with_memory(40, 100),
        )
    }

    fn young_single() -> UserProfile {
        UserProfile::new(25, 50_000.0, 0, RiskTolerance::Medium)
    }

    fn family() -> UserProfile {
        UserProfile::new(45, 80_000.0, 2, RiskTolerance::High)
    }

    // ============================================================================
    // Unit Tests: submit
    // ============================================================================

    #[tokio::test]
    async fn test_submit_computes_and_persists() {
        let orchestrator = build_test_orchestrator();

        let submission = orchestrator
            .submit(young_single(), Some("user-1".to_string()))
            .await
            .expect("submit failed");

        assert_eq!(submission.recommendation.coverage_amount, 7_200_000);
        assert_eq!(submission.recommendation.policy_type, PolicyType::TermLife);
        assert_eq!(submission.recommendation.term_years, 20);
        assert_eq!(submission.owner_id.as_deref(), Some("user-1"));

        let all = orchestrator.all_submissions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, submission.id);
    }

    #[tokio::test]
    async fn test_submit_records_success() {
        let orchestrator = build_test_orchestrator();
        orchestrator.submit(family(), None).await.unwrap();

        let counts = orchestrator.metrics().counts();
        assert_eq!(counts.total, 1);
        assert_eq!(counts.successful, 1);
        assert_eq!(counts.failed, 0);
    }

    #[tokio::test]
    async fn test_invalid_profile_is_rejected_and_counted_as_failure() {
        let orchestrator = build_test_orchestrator();

        let err = orchestrator
            .submit(UserProfile::new(17, 50_000.0, 0, RiskTolerance::Low), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProfileError>(),
            Some(ProfileError::AgeOutOfRange { age: 17, .. })
        ));

        let counts = orchestrator.metrics().counts();
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.successful, 0);

        // Nothing was stored
        assert!(orchestrator.all_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_counted_as_failure() {
        let orchestrator =
            RecommendationOrchestrator::new(Arc::new(FailingStore), metrics_with_memory(40, 100));

        assert!(orchestrator.submit(young_single(), None).await.is_err());
        assert!(orchestrator.history("user-1").await.is_err());

        let counts = orchestrator.metrics().counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.failed, 2);
    }

    // ============================================================================
    // Unit Tests: batch and history
    // ============================================================================

    #[tokio::test]
    async fn test_submit_batch_preserves_order() {
        let orchestrator = build_test_orchestrator();

        let stored = orchestrator
            .submit_batch(vec![young_single(), family()], Some("user-2".to_string()))
            .await
            .expect("batch failed");

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].recommendation.coverage_amount, 7_200_000);
        assert_eq!(stored[1].recommendation.coverage_amount, 13_440_000);
        assert!(stored.iter().all(|s| s.is_owned_by("user-2")));

        // One batch is one request
        assert_eq!(orchestrator.metrics().counts().total, 1);
    }

    #[tokio::test]
    async fn test_submit_batch_rejects_whole_batch_on_invalid_profile() {
        let orchestrator = build_test_orchestrator();

        let err = orchestrator
            .submit_batch(
                vec![young_single(), UserProfile::new(30, 1.0, 11, RiskTolerance::Low)],
                None,
            )
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("index 1"));
        assert!(orchestrator.all_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_per_owner_and_newest_first() {
        let orchestrator = build_test_orchestrator();
        let alice = Some("alice".to_string());

        let first = orchestrator.submit(young_single(), alice.clone()).await.unwrap();
        orchestrator.submit(family(), Some("bob".to_string())).await.unwrap();
        let second = orchestrator.submit(family(), alice).await.unwrap();

        let history = orchestrator.history("alice").await.unwrap();
        let ids: Vec<_> = history.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_file_backed_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");
        let orchestrator = RecommendationOrchestrator::new(
            Arc::new(JsonFileSubmissionStore::new(&path)),
            metrics_with_memory(40, 100),
        );

        orchestrator.submit(family(), Some("carol".to_string())).await.unwrap();

        // A fresh orchestrator over the same file sees the submission
        let reopened = RecommendationOrchestrator::new(
            Arc::new(JsonFileSubmissionStore::new(&path)),
            metrics_with_memory(40, 100),
        );
        let history = reopened.history("carol").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].recommendation.policy_type, PolicyType::WholeLife);
    }

    // ============================================================================
    // Unit Tests: health, readiness, metrics
    // ============================================================================

    #[tokio::test]
    async fn test_health_reflects_recorded_requests() {
        let orchestrator = build_test_orchestrator();
        orchestrator.submit(young_single(), None).await.unwrap();
        let _ = orchestrator
            .submit(UserProfile::new(101, 1.0, 0, RiskTolerance::Low), None)
            .await;

        let health = orchestrator.health();
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.requests.total, 2);
        assert_eq!(health.requests.success_rate, 50.0);

        // The health call itself is recorded once it completes
        assert_eq!(orchestrator.metrics().counts().total, 3);
    }

    #[test]
    fn test_memory_pressure_is_unhealthy_and_not_ready() {
        let orchestrator = RecommendationOrchestrator::new(
            Arc::new(InMemorySubmissionStore::new()),
            metrics_with_memory(95, 100),
        );

        assert_eq!(orchestrator.health().status, HealthStatus::Unhealthy);
        assert_eq!(orchestrator.readiness().status, ReadinessStatus::NotReady);
    }

    #[test]
    fn test_metrics_snapshot_counts_probe_calls() {
        let orchestrator = build_test_orchestrator();
        orchestrator.readiness();
        orchestrator.health();

        let snapshot = orchestrator.metrics_snapshot();
        assert_eq!(snapshot.total_requests, 2);
        assert_eq!(snapshot.successful_requests, 2);
        assert_eq!(snapshot.window_size, 2);
    }
}
