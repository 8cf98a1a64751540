//! Shared utilities for `pagesmith`.

pub mod progress;
