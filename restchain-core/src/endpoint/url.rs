use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::EndpointDefinition;
use crate::collection::EndpointId;
use crate::provider::{OutputLookup, Provider};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("no common or endpoint input named `{name}` for URL placeholder")]
    MissingParameter { name: String },
    #[error("endpoint {endpoint} is not part of this collection")]
    UnknownEndpoint { endpoint: EndpointId },
}

/// Names of the `{name}` placeholders in a path template, in order of first
/// appearance and without duplicates.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PLACEHOLDER_RE.captures_iter(template) {
        let name = &cap[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Strips exactly one leading slash.
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Joins `base_url` and `path` with a single `/`. One trailing slash is
/// dropped from the base as well as one leading slash from the path, so
/// `http://h/` and `http://h` give the same URL.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}/{}", normalize_path(path))
}

impl EndpointDefinition {
    /// Builds the full URL, substituting each placeholder from the common
    /// inputs first and the endpoint's own inputs second.
    pub fn resolve_url(
        &self,
        base_url: &str,
        common_inputs: &BTreeMap<String, Provider>,
        outputs: &dyn OutputLookup,
    ) -> Result<String, UrlError> {
        let mut url = join_url(base_url, &self.path);
        for name in placeholders(&self.path) {
            let provider = common_inputs
                .get(&name)
                .or_else(|| self.inputs.get(&name))
                .ok_or_else(|| UrlError::MissingParameter { name: name.clone() })?;
            url = url.replace(&format!("{{{name}}}"), &provider.produce(outputs));
        }
        Ok(url)
    }
}
