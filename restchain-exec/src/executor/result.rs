use std::collections::BTreeMap;

use restchain_core::{BodyError, EndpointId, ExtractError, HttpMethod, UrlError};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::executor::http::HttpError;

/// What one endpoint's call returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(serialize_with = "body_as_text")]
    pub body: Vec<u8>,
}

fn body_as_text<S: serde::Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(body))
}

impl EndpointOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> Option<JsonValue> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    outcomes: BTreeMap<EndpointId, EndpointOutcome>,
}

impl ExecutionResult {
    pub fn record(&mut self, endpoint: EndpointId, outcome: EndpointOutcome) {
        self.outcomes.insert(endpoint, outcome);
    }

    pub fn get(&self, endpoint: EndpointId) -> Option<&EndpointOutcome> {
        self.outcomes.get(&endpoint)
    }

    pub fn by_name(&self, name: &str) -> Option<&EndpointOutcome> {
        self.outcomes
            .values()
            .find(|o| o.name.as_deref() == Some(name))
    }

    /// Outcomes in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (EndpointId, &EndpointOutcome)> {
        self.outcomes.iter().map(|(id, o)| (*id, o))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}


#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("endpoint {endpoint} is not part of this collection")]
    UnknownEndpoint { endpoint: EndpointId },
    #[error("cannot resolve URL: {0}")]
    MissingUrlParameter(#[from] UrlError),
    #[error("cannot resolve request body: {0}")]
    BodyResolution(#[from] BodyError),
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),
    #[error("response body is not a JSON object: {0}")]
    ResponseParse(#[source] serde_json::Error),
    #[error("output extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}

/// A fatal failure. `partial` holds the outcomes recorded before the abort,
/// including the failing endpoint's own outcome when its response arrived.
#[derive(Debug, thiserror::Error)]
#[error("endpoint {label} failed: {source}")]
pub struct RunError {
    pub endpoint: EndpointId,
    pub label: String,
    #[source]
    pub source: ExecutionError,
    pub partial: ExecutionResult,
}

impl RunError {
    pub(crate) fn new(
        endpoint: EndpointId,
        name: Option<&str>,
        source: ExecutionError,
        partial: ExecutionResult,
    ) -> Self {
        let label = match name {
            Some(name) => format!("`{name}`"),
            None => endpoint.to_string(),
        };
        Self {
            endpoint,
            label,
            source,
            partial,
        }
    }
}
