use crate::document::{CollectionDocument, EndpointDocument};
use crate::endpoint::placeholders;
use crate::method::HttpMethod;
use crate::validate::validator::{Validator, NAME_RE};

use super::values::{validate_body, validate_input, Scope};

pub(crate) fn validate_endpoint(
    v: &mut Validator,
    path: &str,
    idx: usize,
    endpoint: &EndpointDocument,
    doc: &CollectionDocument,
    scope: &Scope<'_>,
) {
    if !NAME_RE.is_match(&endpoint.name) {
        v.push(
            format!("{path}.name"),
            "must match regex ^[A-Za-z0-9_\\-]+$",
        );
    }

    let method = match endpoint.method.parse::<HttpMethod>() {
        Ok(m) => Some(m),
        Err(e) => {
            v.push(format!("{path}.method"), e.to_string());
            None
        }
    };

    for name in placeholders(&endpoint.path) {
        if !doc.inputs.contains_key(&name) && !endpoint.inputs.contains_key(&name) {
            v.push(
                format!("{path}.path"),
                format!("placeholder `{{{name}}}` has no common or endpoint input"),
            );
        }
    }

    for (name, value) in &endpoint.inputs {
        validate_input(v, &format!("{path}.inputs.{name}"), value, scope, Some(idx));
    }
    if let Some(body) = &endpoint.body {
        validate_body(v, &format!("{path}.body"), body, scope, Some(idx));
    }
    for (name, value) in &endpoint.body_fields {
        validate_input(v, &format!("{path}.bodyFields.{name}"), value, scope, Some(idx));
    }

    for (response_path, key) in &endpoint.outputs {
        let at = format!("{path}.outputs.{response_path}");
        if response_path.split('.').any(str::is_empty) {
            v.push(at.clone(), "response path segments must not be empty");
        }
        if key.is_empty() {
            v.push(at, "output key must not be empty");
        }
    }

    let Some(method) = method else {
        return;
    };
    if !method.carries_body() {
        if endpoint.body.is_some() || !endpoint.body_fields.is_empty() {
            v.push(
                format!("{path}.body"),
                format!("{method} requests do not send a body"),
            );
        }
        if !endpoint.outputs.is_empty() {
            v.push(
                format!("{path}.outputs"),
                format!("outputs are only extracted from POST, PUT and PATCH responses, not {method}"),
            );
        }
    }
}
