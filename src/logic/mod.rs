//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Failure classification and user-facing messages
//! - jump: Ancestor path reconstruction for jump-to
//! - keymap: Key bindings and the double-tap gesture
//! - layout: Column track geometry
//! - navigation: Focus index calculations
//! - paste: Which staged items move and which folders reload
//! - search: Palette matching (glob or fuzzy)
//! - session: Restoring a stack from the persisted list state
//! - ui: UI state transitions and cycling

pub mod errors;
pub mod jump;
pub mod keymap;
pub mod layout;
pub mod navigation;
pub mod paste;
pub mod search;
pub mod session;
pub mod ui;
