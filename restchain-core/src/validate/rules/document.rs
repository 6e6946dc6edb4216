use std::collections::BTreeSet;

use crate::document::CollectionDocument;
use crate::validate::validator::Validator;

use super::endpoint::validate_endpoint;
use super::values::{validate_input, Scope};

pub(crate) fn validate_document(v: &mut Validator, doc: &CollectionDocument) {
    validate_base_url(v, &doc.base_url);

    let scope = Scope::new(doc);
    for (name, value) in &doc.inputs {
        validate_input(v, &format!("inputs.{name}"), value, &scope, None);
    }

    let mut seen = BTreeSet::new();
    for (idx, endpoint) in doc.endpoints.iter().enumerate() {
        let path = format!("endpoints[{idx}]");
        if !seen.insert(endpoint.name.as_str()) {
            v.push(
                format!("{path}.name"),
                format!("duplicate endpoint name `{}`", endpoint.name),
            );
        }
        validate_endpoint(v, &path, idx, endpoint, doc, &scope);
    }
}

fn validate_base_url(v: &mut Validator, base_url: &str) {
    if base_url.is_empty() {
        v.push("baseUrl", "must not be empty");
        return;
    }
    match url::Url::parse(base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        Ok(u) => v.push("baseUrl", format!("unsupported scheme `{}`", u.scheme())),
        Err(e) => v.push("baseUrl", format!("invalid URL: {e}")),
    }
}
