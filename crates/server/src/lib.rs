//! Server crate for the CoverRecs recommendation service.
//!
//! This crate contains the orchestrator that validates profiles, runs the
//! engine, persists submissions and instruments every operation.

pub mod config;
pub mod orchestrator;

pub use config::{ServiceConfig, StoreConfig};
pub use orchestrator::RecommendationOrchestrator;
