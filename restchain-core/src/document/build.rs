use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::reference::{is_reference, value_source, ValueSource};
use super::{CollectionDocument, EndpointDocument};
use crate::body::{BodyField, RequestBody};
use crate::collection::{Collection, EndpointId};
use crate::endpoint::EndpointDefinition;
use crate::error::{DocumentError, ValidationError, Violation};
use crate::method::HttpMethod;
use crate::provider::{Provider, SequenceProvider};
use crate::validate::validate_document;

/// Validates `doc` and assembles the collection it describes. Endpoint ids
/// follow document order.
pub fn build_collection(doc: &CollectionDocument) -> Result<Collection, DocumentError> {
    validate_document(doc)?;
    assemble(doc).map_err(|v| DocumentError::Validation(ValidationError::new(vec![v])))
}

struct Builder<'a> {
    ids: BTreeMap<&'a str, EndpointId>,
}

fn assemble(doc: &CollectionDocument) -> Result<Collection, Violation> {
    let builder = Builder {
        ids: doc
            .endpoints
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.name.as_str(), EndpointId::new(idx)))
            .collect(),
    };

    let mut collection = Collection::new().with_base_url(doc.base_url.clone());
    if let Some(token) = &doc.bearer_token {
        collection.set_bearer_token(token.clone());
    }
    for (name, value) in &doc.inputs {
        let provider = builder.provider(&format!("inputs.{name}"), value)?;
        collection.add_common_input(name.clone(), provider);
    }
    for (idx, endpoint) in doc.endpoints.iter().enumerate() {
        let definition = builder.endpoint(&format!("endpoints[{idx}]"), endpoint)?;
        collection.add_endpoint(definition);
    }
    Ok(collection)
}

impl Builder<'_> {
    fn endpoint(&self, path: &str, doc: &EndpointDocument) -> Result<EndpointDefinition, Violation> {
        let method: HttpMethod = doc
            .method
            .parse()
            .map_err(|e| Violation::new(format!("{path}.method"), format!("{e}")))?;

        let mut endpoint = EndpointDefinition::new(method, doc.path.clone()).with_name(doc.name.clone());
        for (name, value) in &doc.headers {
            endpoint = endpoint.with_header(name.clone(), value.clone());
        }
        for (name, value) in &doc.query {
            endpoint = endpoint.with_query_param(name.clone(), value.clone());
        }
        for (name, value) in &doc.inputs {
            let provider = self.provider(&format!("{path}.inputs.{name}"), value)?;
            endpoint = endpoint.with_input(name.clone(), provider);
        }
        if let Some(body) = &doc.body {
            endpoint = endpoint.with_body(self.body(&format!("{path}.body"), body)?);
        }
        for (name, value) in &doc.body_fields {
            let provider = self.provider(&format!("{path}.bodyFields.{name}"), value)?;
            endpoint = endpoint.with_body_field(name.clone(), provider);
        }
        for (response_path, output_key) in &doc.outputs {
            endpoint = endpoint.register_output(response_path.clone(), output_key.clone());
        }
        Ok(endpoint)
    }

    fn provider(&self, path: &str, value: &JsonValue) -> Result<Provider, Violation> {
        match value_source(value).map_err(|e| Violation::new(path, e.to_string()))? {
            ValueSource::Constant(v) => Ok(Provider::Constant(v)),
            ValueSource::Output { endpoint, key } => {
                let id = self.ids.get(endpoint).ok_or_else(|| {
                    Violation::new(path, format!("unknown endpoint `{endpoint}`"))
                })?;
                Ok(id.output(key))
            }
            ValueSource::Env(var) => {
                let var = var.to_string();
                Ok(Provider::computed(move || std::env::var(&var).unwrap_or_default()))
            }
        }
    }

    fn body(&self, path: &str, value: &JsonValue) -> Result<RequestBody, Violation> {
        let JsonValue::Object(map) = value else {
            return Err(Violation::new(path, "body must be an object"));
        };
        let mut body = RequestBody::new();
        for (name, field) in map {
            body.insert(name.clone(), self.field(&format!("{path}.{name}"), field)?);
        }
        Ok(body)
    }

    fn field(&self, path: &str, value: &JsonValue) -> Result<BodyField, Violation> {
        if is_reference(value) {
            return self.provider(path, value).map(BodyField::Scalar);
        }
        Ok(match value {
            JsonValue::Object(_) => BodyField::Nested(self.body(path, value)?),
            JsonValue::Array(items) => BodyField::Sequence(SequenceProvider::Constant(items.clone())),
            other => BodyField::Literal(other.clone()),
        })
    }
}
