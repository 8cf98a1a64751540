//! `pagesmith` turns recorded browser interactions and JSON API definitions
//! into Playwright TypeScript boilerplate.
//!
//! - [`recorder`]: recording -> page-object class + test script
//! - [`api`]: API definitions -> models, client class and spec per definition
//! - [`watch`]: regenerate whenever a recording lands in a directory

pub mod api;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod recorder;
pub mod util;
pub mod watch;

pub use error::{ErrorCode, GenError, Result, StructuredError};
