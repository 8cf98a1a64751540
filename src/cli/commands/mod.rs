//! Command implementations.

pub mod api;
pub mod completions;
pub mod config;
pub mod record;
pub mod schema;
pub mod version;
pub mod watch;
