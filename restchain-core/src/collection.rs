use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::{EndpointDefinition, UrlError};
use crate::provider::{OutputLookup, Provider};

/// Position of an endpoint within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointId(usize);

impl EndpointId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Provider reading `key` from this endpoint's output store.
    pub fn output(self, key: impl Into<String>) -> Provider {
        Provider::output(self, key)
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered endpoints plus the inputs, base URL and credentials they share.
/// Declaration order is execution order.
#[derive(Clone, Default)]
pub struct Collection {
    endpoints: Vec<EndpointDefinition>,
    common_inputs: BTreeMap<String, Provider>,
    base_url: String,
    bearer_token: Option<String>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_endpoint(&mut self, endpoint: EndpointDefinition) -> EndpointId {
        self.endpoints.push(endpoint);
        EndpointId(self.endpoints.len() - 1)
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDefinition) -> Self {
        self.add_endpoint(endpoint);
        self
    }

    pub fn add_common_input(&mut self, name: impl Into<String>, provider: impl Into<Provider>) {
        self.common_inputs.insert(name.into(), provider.into());
    }

    pub fn with_common_input(
        mut self,
        name: impl Into<String>,
        provider: impl Into<Provider>,
    ) -> Self {
        self.add_common_input(name, provider);
        self
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.set_base_url(base_url);
        self
    }

    pub fn set_bearer_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.bearer_token = (!token.is_empty()).then_some(token);
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.set_bearer_token(token);
        self
    }

    /// The id the next added endpoint will receive.
    pub fn next_id(&self) -> EndpointId {
        EndpointId(self.endpoints.len())
    }

    pub fn ids(&self) -> impl Iterator<Item = EndpointId> {
        (0..self.endpoints.len()).map(EndpointId)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[EndpointDefinition] {
        &self.endpoints
    }

    pub fn endpoint(&self, id: EndpointId) -> Option<&EndpointDefinition> {
        self.endpoints.get(id.0)
    }

    pub fn endpoint_mut(&mut self, id: EndpointId) -> Option<&mut EndpointDefinition> {
        self.endpoints.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<EndpointId> {
        self.endpoints
            .iter()
            .position(|e| e.name() == Some(name))
            .map(EndpointId)
    }

    pub fn common_inputs(&self) -> &BTreeMap<String, Provider> {
        &self.common_inputs
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn resolve_url(&self, id: EndpointId) -> Result<String, UrlError> {
        let endpoint = self
            .endpoint(id)
            .ok_or(UrlError::UnknownEndpoint { endpoint: id })?;
        endpoint.resolve_url(&self.base_url, &self.common_inputs, self)
    }
}

impl OutputLookup for Collection {
    fn output(&self, endpoint: EndpointId, key: &str) -> Option<&str> {
        self.endpoints.get(endpoint.0)?.output(key)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("endpoints", &self.endpoints)
            .field("common_inputs", &self.common_inputs)
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .finish()
    }
}
