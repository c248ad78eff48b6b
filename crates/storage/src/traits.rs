//! Storage collaborator interface.
//!
//! Submissions are append-only. The service only ever creates them and
//! lists them back, newest first.

use async_trait::async_trait;
use profile::Submission;

use crate::error::Result;

/// Append/query store for submissions.
///
/// `Send + Sync` lets one store be shared across concurrent requests.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Returns the name of this store (for logging/debugging)
    fn name(&self) -> &str;

    /// Persist a new submission and return it as stored
    async fn create(&self, submission: Submission) -> Result<Submission>;

    /// Every submission, newest first
    async fn find_all(&self) -> Result<Vec<Submission>>;

    /// Submissions belonging to one owner, newest first
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Submission>>;
}

/// Sort by `created_at`, newest first.
///
/// Stable: callers pass records newest-inserted first so that equal
/// timestamps keep that order.
pub(crate) fn sort_newest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
