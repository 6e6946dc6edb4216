//! Serializable description of a collection.
//!
//! Input and body values may reference deferred sources:
//! `{ "$output": "<endpoint>.<key>" }` reads a previous endpoint's extracted
//! output and `{ "$env": "<VAR>" }` reads an environment variable when the
//! value is needed.

mod build;
mod reference;

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

pub use self::build::build_collection;
pub(crate) use self::reference::is_reference;
pub use self::reference::{value_source, ReferenceError, ValueSource};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollectionDocument {
    #[serde(default)]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, JsonValue>,

    #[serde(default)]
    pub endpoints: Vec<EndpointDocument>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointDocument {
    pub name: String,

    #[serde(default = "default_method")]
    pub method: String,

    pub path: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub body_fields: BTreeMap<String, JsonValue>,

    /// Response path to output key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
}

fn default_method() -> String {
    "GET".to_string()
}
