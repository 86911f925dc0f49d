//! Relevance Workbench
//!
//! Entity-creation pipeline of a search relevance workbench:
//! - Drafts for query sets, search configurations, judgments and experiments
//! - Collect-all validation with per-field messages
//! - NDJSON query uploads with preview
//! - Single in-flight submission to an HTTP or in-memory backend
//! - Experiment template registry

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
