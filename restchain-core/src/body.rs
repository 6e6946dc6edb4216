//! Request bodies whose fields may be deferred.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use crate::provider::{OutputLookup, Provider, SequenceProvider};

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Value of a single body field.
#[derive(Debug, Clone)]
pub enum BodyField {
    Literal(JsonValue),
    Scalar(Provider),
    Sequence(SequenceProvider),
    Nested(RequestBody),
}

impl BodyField {
    fn resolve(&self, outputs: &dyn OutputLookup) -> JsonValue {
        match self {
            BodyField::Literal(v) => v.clone(),
            BodyField::Scalar(p) => JsonValue::String(p.produce(outputs)),
            BodyField::Sequence(p) => JsonValue::Array(p.produce()),
            BodyField::Nested(body) => JsonValue::Object(body.resolve(outputs)),
        }
    }
}

impl From<Provider> for BodyField {
    fn from(p: Provider) -> Self {
        BodyField::Scalar(p)
    }
}

impl From<SequenceProvider> for BodyField {
    fn from(p: SequenceProvider) -> Self {
        BodyField::Sequence(p)
    }
}

impl From<RequestBody> for BodyField {
    fn from(b: RequestBody) -> Self {
        BodyField::Nested(b)
    }
}

impl From<JsonValue> for BodyField {
    fn from(v: JsonValue) -> Self {
        BodyField::Literal(v)
    }
}

/// A tree of named fields resolved to a JSON object on demand.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    fields: BTreeMap<String, BodyField>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, field: impl Into<BodyField>) -> Self {
        self.insert(name, field);
        self
    }

    pub fn with_literal(self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.with_field(name, BodyField::Literal(value.into()))
    }

    pub fn with_provider(self, name: impl Into<String>, provider: Provider) -> Self {
        self.with_field(name, BodyField::Scalar(provider))
    }

    pub fn with_sequence(self, name: impl Into<String>, provider: SequenceProvider) -> Self {
        self.with_field(name, BodyField::Sequence(provider))
    }

    pub fn with_nested(self, name: impl Into<String>, body: RequestBody) -> Self {
        self.with_field(name, BodyField::Nested(body))
    }

    pub fn insert(&mut self, name: impl Into<String>, field: impl Into<BodyField>) {
        self.fields.insert(name.into(), field.into());
    }

    pub fn fields(&self) -> &BTreeMap<String, BodyField> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves every field, recursing into nested bodies. Used both for the
    /// wire payload and when this body is embedded in an outer one.
    pub fn resolve(&self, outputs: &dyn OutputLookup) -> Map<String, JsonValue> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.resolve(outputs)))
            .collect()
    }

    pub fn to_json_bytes(&self, outputs: &dyn OutputLookup) -> Result<Vec<u8>, BodyError> {
        Ok(serde_json::to_vec(&self.resolve(outputs))?)
    }
}
