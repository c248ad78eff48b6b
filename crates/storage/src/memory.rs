//! In-process submission store.
//!
//! Contents live for as long as the store does. Used by tests, benchmarks
//! and deployments that do not need history across restarts.

use async_trait::async_trait;
use parking_lot::RwLock;
use profile::Submission;
use tracing::debug;

use crate::error::Result;
use crate::traits::{SubmissionStore, sort_newest_first};

/// Keeps submissions in insertion order behind a read/write lock.
#[derive(Default)]
pub struct InMemorySubmissionStore {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.submissions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.read().is_empty()
    }

    fn collect_newest_first(&self, keep: impl Fn(&Submission) -> bool) -> Vec<Submission> {
        let mut matching: Vec<Submission> = self
            .submissions
            .read()
            .iter()
            .rev()
            .filter(|s| keep(*s))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        matching
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    fn name(&self) -> &str {
        "InMemorySubmissionStore"
    }

    async fn create(&self, submission: Submission) -> Result<Submission> {
        let mut submissions = self.submissions.write();
        submissions.push(submission.clone());
        debug!("Stored submission {} ({} total)", submission.id, submissions.len());
        Ok(submission)
    }

    async fn find_all(&self) -> Result<Vec<Submission>> {
        Ok(self.collect_newest_first(|_| true))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Submission>> {
        Ok(self.collect_newest_first(|s| s.is_owned_by(owner_id)))
    }
}
