//! API definition input types.
//!
//! The `Raw*` types mirror the JSON input loosely: every field is optional
//! so a missing value surfaces as a validation error on that one item
//! rather than a decode failure of the whole batch. Validation turns them
//! into the strict [`ApiDefinition`] the emitters consume. Unknown keys
//! are rejected so a misspelled field fails its item instead of vanishing.

use crate::error::{GenError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One element of the API input array, as decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawApiDefinition {
    /// Class name of the generated API object.
    pub page_name: Option<String>,
    /// Route every request of this API is sent to.
    pub base_route: Option<String>,
    /// Optional subdirectory for the generated files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    pub cases: Option<Vec<RawApiCase>>,
}

/// One endpoint case, as decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawApiCase {
    pub method_name: Option<String>,
    pub description: Option<String>,
    pub expect_status: Option<u16>,
    /// GET, POST, PUT, PATCH or DELETE (any case). Inferred from
    /// `methodName` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<Vec<RawValidationCase>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_params: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_response: Option<Value>,
    /// Passed through verbatim to `expectDatabaseValidation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_validation: Option<Value>,
}

/// A negative sub-case of an endpoint, as decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawValidationCase {
    pub description: Option<String>,
    pub expect_status: Option<u16>,
    /// Dot-separated locale key the error message must equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// HTTP method of a generated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Guess the method from a method name's leading verb.
    ///
    /// `getUser` and `listOrders` are GET, `deleteUser` DELETE, `updateUser`
    /// PUT, `patchUser` PATCH. Anything else falls back to POST.
    #[must_use]
    pub fn infer_from_name(method_name: &str) -> Self {
        let verb: String = method_name
            .chars()
            .take_while(char::is_ascii_lowercase)
            .collect();
        match verb.as_str() {
            "get" | "fetch" | "list" | "find" | "search" => Self::Get,
            "delete" | "remove" => Self::Delete,
            "update" | "replace" => Self::Put,
            "patch" => Self::Patch,
            _ => Self::Post,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(GenError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// A validated API definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    pub page_name: String,
    pub base_route: String,
    pub folder: Option<String>,
    pub cases: Vec<ApiCase>,
}

/// A validated endpoint case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCase {
    pub method_name: String,
    pub description: String,
    pub expect_status: u16,
    pub method: HttpMethod,
    pub data: Option<Value>,
    pub params: Option<Value>,
    pub validations: Vec<ValidationCase>,
    pub tags: Vec<String>,
    pub required_fields: Option<Vec<String>>,
    pub required_params: Option<Vec<String>>,
    pub expected_response: Option<Value>,
    pub database_validation: Option<Value>,
}

/// A validated negative sub-case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationCase {
    pub description: String,
    pub expect_status: u16,
    pub message_key: Option<String>,
    pub data: Option<Value>,
    pub params: Option<Value>,
    pub tags: Vec<String>,
}

impl ApiDefinition {
    /// Every locale key referenced by a validation sub-case, in order.
    #[must_use]
    pub fn message_keys(&self) -> Vec<&str> {
        self.cases
            .iter()
            .flat_map(|case| case.validations.iter())
            .filter_map(|v| v.message_key.as_deref())
            .collect()
    }

    /// `<PageName>Models`
    #[must_use]
    pub fn models_module(&self) -> String {
        format!("{}Models", self.page_name)
    }
}

impl ApiCase {
    /// Interface-name stem: the method name with its first letter uppercased.
    #[must_use]
    pub fn type_stem(&self) -> String {
        crate::recorder::ident::upper_first(&self.method_name)
    }

    /// Whether `data` is a JSON object and gets a request interface.
    #[must_use]
    pub fn has_request_model(&self) -> bool {
        self.data.as_ref().is_some_and(Value::is_object)
    }

    /// Whether `params` is a JSON object and gets a params interface.
    #[must_use]
    pub fn has_params_model(&self) -> bool {
        self.params.as_ref().is_some_and(Value::is_object)
    }

    /// Whether `expectedResponse` is a JSON object and gets a response interface.
    #[must_use]
    pub fn has_response_model(&self) -> bool {
        self.expected_response.as_ref().is_some_and(Value::is_object)
    }
}
