//! # Storage Crate
//!
//! Persistence for recommendation submissions.
//!
//! The service treats storage as an opaque collaborator: it appends a
//! submission after every successful recommendation and lists them back
//! by owner or globally, newest first.
//!
//! ## Components
//!
//! - **traits**: the `SubmissionStore` interface
//! - **memory**: `InMemorySubmissionStore`, process-lifetime storage
//! - **file**: `JsonFileSubmissionStore`, append-only JSON Lines on disk
//! - **error**: Error types for storage failures

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::JsonFileSubmissionStore;
pub use memory::InMemorySubmissionStore;
pub use traits::SubmissionStore;
