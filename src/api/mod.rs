//! API-definition code generation.
//!
//! Each JSON definition yields three files:
//!
//! - `<PageName>Models.ts` with interfaces inferred from sample payloads
//! - `<PageName>.ts`, a class extending `BaseApi` with one method per case
//! - `<PageName>.spec.ts`, a test per case and per validation sub-case
//!
//! Validation message keys are also added to the locale file.

pub mod batch;
pub mod client;
pub mod definition;
pub mod locale;
pub mod models;
pub mod spec;
pub mod validate;

pub use batch::{BatchReport, ItemOutcome, generate_batch, generate_items, load_definitions};
pub use definition::{ApiCase, ApiDefinition, HttpMethod, RawApiDefinition, ValidationCase};
pub use locale::{LocaleFile, ensure_message_keys};
pub use validate::validate_definition;
