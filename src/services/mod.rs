//! External Services
//!
//! This module contains services that talk to storage off the UI loop:
//! - repo: repository request queue service

pub mod repo;

// Re-export commonly used types for convenience
pub use repo::{spawn_repo_service, Priority, ReloadScope, RepoRequest, RepoResponse};
