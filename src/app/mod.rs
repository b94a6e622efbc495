//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in the library's model module)
//! - The repository service (requests go out over a channel)
//! - Handlers (in src/handlers/)
//! - Logic (pure business logic in the library's logic module)
//! - UI rendering (in src/ui/)
//!
//! Methods are kept as `impl App` but organized by functional domain
//! for better discoverability and maintainability.

pub(crate) mod clipboard;
pub(crate) mod edit;
pub(crate) mod jump;
pub(crate) mod navigation;
pub(crate) mod session;
pub(crate) mod tabs;
