//! Output abstraction that routes to plain, JSON or quiet output based on mode.

pub mod context;

pub use context::{OutputContext, OutputMode};
