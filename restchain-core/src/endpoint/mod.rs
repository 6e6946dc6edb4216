//! A single HTTP call within a collection.

mod outputs;
mod url;

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use crate::body::{BodyError, RequestBody};
use crate::method::HttpMethod;
use crate::provider::{OutputLookup, OutputStore, Provider};

pub use self::outputs::{ExtractError, TraversalFailure};
pub use self::url::{join_url, normalize_path, placeholders, UrlError};

#[derive(Debug, Clone, Default)]
pub struct EndpointDefinition {
    name: Option<String>,
    path: String,
    method: HttpMethod,
    body: Option<RequestBody>,
    body_fields: BTreeMap<String, Provider>,
    inputs: BTreeMap<String, Provider>,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    registrations: BTreeMap<String, String>,
    outputs: OutputStore,
}

impl EndpointDefinition {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a scalar field merged over the declared body when it is resolved.
    pub fn with_body_field(mut self, name: impl Into<String>, provider: Provider) -> Self {
        self.body_fields.insert(name.into(), provider);
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, provider: impl Into<Provider>) -> Self {
        self.inputs.insert(name.into(), provider.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Registers a dotted response path whose string value is stored under
    /// `output_key` after a successful response.
    pub fn register_output(
        mut self,
        response_path: impl Into<String>,
        output_key: impl Into<String>,
    ) -> Self {
        self.registrations
            .insert(response_path.into(), output_key.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn inputs(&self) -> &BTreeMap<String, Provider> {
        &self.inputs
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn registrations(&self) -> &BTreeMap<String, String> {
        &self.registrations
    }

    pub fn outputs(&self) -> &OutputStore {
        &self.outputs
    }

    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }

    pub fn put_output(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.outputs.insert(key.into(), value.into());
    }

    /// Resolves the declared body with the additional body fields merged on
    /// top. `None` when neither is present.
    pub fn resolve_body(&self, outputs: &dyn OutputLookup) -> Option<Map<String, JsonValue>> {
        if self.body.is_none() && self.body_fields.is_empty() {
            return None;
        }
        let mut resolved = self
            .body
            .as_ref()
            .map(|b| b.resolve(outputs))
            .unwrap_or_default();
        for (name, provider) in &self.body_fields {
            resolved.insert(name.clone(), JsonValue::String(provider.produce(outputs)));
        }
        Some(resolved)
    }

    pub fn body_bytes(&self, outputs: &dyn OutputLookup) -> Result<Option<Vec<u8>>, BodyError> {
        match self.resolve_body(outputs) {
            Some(map) => Ok(Some(serde_json::to_vec(&map)?)),
            None => Ok(None),
        }
    }
}
