//! Schema command: JSON schema of the API definition file.

use crate::api::RawApiDefinition;
use crate::error::Result;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// The schema of the whole input file (an array of definitions).
#[must_use]
pub fn input_schema() -> RootSchema {
    schema_for!(Vec<RawApiDefinition>)
}

/// Execute the schema command. Output is always JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn execute() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&input_schema())?);
    Ok(())
}
