//! Note Finder Library
//!
//! The multi-tab column browser core: model, pure logic, storage and the
//! repository service. The binary adds the terminal UI on top.

pub mod config;
pub mod logic;
pub mod model;
pub mod repo;
pub mod services;
pub mod session;
pub mod store;
pub mod utils;
