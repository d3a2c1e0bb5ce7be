//! Gasify - gasification analytics client (TUI edition)
//!
//! Typed form state, request serialization and result rendering for the
//! scatter visualization and KNN prediction endpoints of the analytics service.

pub mod config;
pub mod core;
pub mod tui;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
