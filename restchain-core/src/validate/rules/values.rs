use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::document::{is_reference, value_source, CollectionDocument, EndpointDocument, ValueSource};
use crate::validate::validator::Validator;

/// Endpoint names visible to `$output` references, first declaration wins.
pub(crate) struct Scope<'a> {
    endpoints: BTreeMap<&'a str, (usize, &'a EndpointDocument)>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(doc: &'a CollectionDocument) -> Self {
        let mut endpoints = BTreeMap::new();
        for (idx, e) in doc.endpoints.iter().enumerate() {
            endpoints.entry(e.name.as_str()).or_insert((idx, e));
        }
        Self { endpoints }
    }
}

/// `current` is the index of the endpoint owning the value; common inputs
/// pass `None` and may reference any endpoint.
pub(crate) fn validate_input(
    v: &mut Validator,
    path: &str,
    value: &JsonValue,
    scope: &Scope<'_>,
    current: Option<usize>,
) {
    match value_source(value) {
        Err(e) => v.push(path, e.to_string()),
        Ok(ValueSource::Output { endpoint, key }) => {
            validate_output_ref(v, path, endpoint, key, scope, current)
        }
        Ok(ValueSource::Constant(_) | ValueSource::Env(_)) => {}
    }
}

fn validate_output_ref(
    v: &mut Validator,
    path: &str,
    endpoint: &str,
    key: &str,
    scope: &Scope<'_>,
    current: Option<usize>,
) {
    let Some((idx, target)) = scope.endpoints.get(endpoint) else {
        v.push(path, format!("unknown endpoint `{endpoint}`"));
        return;
    };
    if current.is_some_and(|current| *idx >= current) {
        v.push(
            path,
            format!("endpoint `{endpoint}` does not run before this endpoint"),
        );
    }
    if !target.outputs.values().any(|k| k == key) {
        v.push(
            path,
            format!("endpoint `{endpoint}` registers no output `{key}`"),
        );
    }
}

pub(crate) fn validate_body(
    v: &mut Validator,
    path: &str,
    value: &JsonValue,
    scope: &Scope<'_>,
    current: Option<usize>,
) {
    let JsonValue::Object(map) = value else {
        v.push(path, "body must be an object");
        return;
    };
    for (name, field) in map {
        validate_body_field(v, &format!("{path}.{name}"), field, scope, current);
    }
}

fn validate_body_field(
    v: &mut Validator,
    path: &str,
    value: &JsonValue,
    scope: &Scope<'_>,
    current: Option<usize>,
) {
    if is_reference(value) {
        validate_input(v, path, value, scope, current);
        return;
    }
    match value {
        JsonValue::Object(_) => validate_body(v, path, value, scope, current),
        JsonValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if contains_reference(item) {
                    v.push(
                        format!("{path}[{i}]"),
                        "references are not supported inside arrays",
                    );
                }
            }
        }
        _ => {}
    }
}

fn contains_reference(value: &JsonValue) -> bool {
    match value {
        JsonValue::Object(map) => is_reference(value) || map.values().any(contains_reference),
        JsonValue::Array(items) => items.iter().any(contains_reference),
        _ => false,
    }
}
