//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - repo: Responses from the background repository service
//! - keyboard: User keyboard input
//!
//! Handlers take &mut App and translate an event into model updates and
//! follow-up repository requests.

pub mod keyboard;
pub mod repo;

// Re-export for convenience
pub use repo::handle_repo_response;
