//! Append-only JSON Lines submission store.
//!
//! One submission per line. Writes are serialised through an async mutex so
//! concurrent `create` calls never interleave partial lines.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use profile::Submission;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::traits::{SubmissionStore, sort_newest_first};

/// Persists submissions to a `.jsonl` file so history survives restarts.
pub struct JsonFileSubmissionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSubmissionStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// Parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Using submission file {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, newest-inserted first. A missing file is an empty store.
    async fn load(&self) -> Result<Vec<Submission>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut submissions = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let submission: Submission =
                serde_json::from_str(line).map_err(|e| StoreError::CorruptRecord {
                    path: self.path.clone(),
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            submissions.push(submission);
        }
        submissions.reverse();
        Ok(submissions)
    }
}

#[async_trait]
impl SubmissionStore for JsonFileSubmissionStore {
    fn name(&self) -> &str {
        "JsonFileSubmissionStore"
    }

    async fn create(&self, submission: Submission) -> Result<Submission> {
        let mut line = serde_json::to_string(&submission)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended submission {} to {}", submission.id, self.path.display());
        Ok(submission)
    }

    async fn find_all(&self) -> Result<Vec<Submission>> {
        let mut submissions = self.load().await?;
        sort_newest_first(&mut submissions);
        Ok(submissions)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .load()
            .await?
            .into_iter()
            .filter(|s| s.is_owned_by(owner_id))
            .collect();
        sort_newest_first(&mut submissions);
        Ok(submissions)
    }
}
