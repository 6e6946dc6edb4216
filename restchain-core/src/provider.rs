//! Deferred value producers.
//!
//! A provider is declared when a collection is built and invoked only when a
//! URL or body is resolved. Providers never memoize: an output lookup reads
//! the referenced endpoint's store each time it is produced, so the value it
//! yields tracks whatever that endpoint has extracted so far.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::collection::EndpointId;

/// Extracted output values of a single endpoint, keyed by output key.
pub type OutputStore = BTreeMap<String, String>;

/// Read access to the output stores of a collection's endpoints.
pub trait OutputLookup {
    fn output(&self, endpoint: EndpointId, key: &str) -> Option<&str>;
}

/// Producer of a scalar string value.
#[derive(Clone)]
pub enum Provider {
    Constant(String),
    /// Looks up `key` in the output store of `endpoint` at call time.
    Output { endpoint: EndpointId, key: String },
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Provider {
    pub fn constant(value: impl Into<String>) -> Self {
        Provider::Constant(value.into())
    }

    pub fn output(endpoint: EndpointId, key: impl Into<String>) -> Self {
        Provider::Output {
            endpoint,
            key: key.into(),
        }
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Provider::Computed(Arc::new(f))
    }

    /// Output lookups of keys that have not been extracted yet produce an
    /// empty string.
    pub fn produce(&self, outputs: &dyn OutputLookup) -> String {
        match self {
            Provider::Constant(v) => v.clone(),
            Provider::Output { endpoint, key } => {
                outputs.output(*endpoint, key).unwrap_or_default().to_string()
            }
            Provider::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Provider::Output { endpoint, key } => f
                .debug_struct("Output")
                .field("endpoint", endpoint)
                .field("key", key)
                .finish(),
            Provider::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        Provider::constant(value)
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        Provider::Constant(value)
    }
}

/// Producer of an ordered sequence of JSON values.
#[derive(Clone)]
pub enum SequenceProvider {
    Constant(Vec<JsonValue>),
    Computed(Arc<dyn Fn() -> Vec<JsonValue> + Send + Sync>),
}

impl SequenceProvider {
    pub fn constant<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        SequenceProvider::Constant(values.into_iter().map(Into::into).collect())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Vec<JsonValue> + Send + Sync + 'static,
    {
        SequenceProvider::Computed(Arc::new(f))
    }

    pub fn produce(&self) -> Vec<JsonValue> {
        match self {
            SequenceProvider::Constant(v) => v.clone(),
            SequenceProvider::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for SequenceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceProvider::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            SequenceProvider::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
