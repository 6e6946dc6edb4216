use serde_json::{Map, Value as JsonValue};

use super::EndpointDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalFailure {
    MissingKey,
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("{} `{key}` while traversing registered output `{path}`", describe(.failure))]
    PathTraversal {
        path: String,
        key: String,
        failure: TraversalFailure,
    },
    #[error("registered output `{path}` resolved to {found}, only strings are supported")]
    UnsupportedLeafType { path: String, found: &'static str },
}

fn describe(failure: &TraversalFailure) -> &'static str {
    match failure {
        TraversalFailure::MissingKey => "missing key",
        TraversalFailure::NotAnObject => "non-object value before key",
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn leaf_string(node: &JsonValue, path: &str) -> Result<String, ExtractError> {
    match node {
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(ExtractError::UnsupportedLeafType {
            path: path.to_string(),
            found: type_name(other),
        }),
    }
}

fn traversal(path: &str, key: &str, failure: TraversalFailure) -> ExtractError {
    ExtractError::PathTraversal {
        path: path.to_string(),
        key: key.to_string(),
        failure,
    }
}

/// Walks `root` along the dot-separated `path`. A non-object node reached
/// below the root is accepted as the leaf when only the final segment remains.
pub(crate) fn extract_path(
    root: &Map<String, JsonValue>,
    path: &str,
) -> Result<String, ExtractError> {
    let (parents, leaf): (Vec<&str>, &str) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (parents.split('.').collect(), leaf),
        None => (Vec::new(), path),
    };
    let mut map = root;
    for (idx, key) in parents.iter().enumerate() {
        let node = map
            .get(*key)
            .ok_or_else(|| traversal(path, key, TraversalFailure::MissingKey))?;
        map = match node.as_object() {
            Some(next) => next,
            None if idx + 1 == parents.len() => return leaf_string(node, path),
            None => return Err(traversal(path, parents[idx + 1], TraversalFailure::NotAnObject)),
        };
    }
    let node = map
        .get(leaf)
        .ok_or_else(|| traversal(path, leaf, TraversalFailure::MissingKey))?;
    leaf_string(node, path)
}

impl EndpointDefinition {
    /// Extracts every registered output from a parsed response and stores
    /// them. Nothing is stored unless every registration resolves. Returns
    /// the output keys written.
    pub fn extract_outputs(
        &mut self,
        response: &Map<String, JsonValue>,
    ) -> Result<Vec<String>, ExtractError> {
        let mut extracted = Vec::with_capacity(self.registrations.len());
        for (path, key) in &self.registrations {
            extracted.push((key.clone(), extract_path(response, path)?));
        }
        let keys = extracted.iter().map(|(k, _)| k.clone()).collect();
        self.outputs.extend(extracted);
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn registered() -> EndpointDefinition {
        EndpointDefinition::post("/widgets").register_output("data.id", "widgetId")
    }

    #[test]
    fn stores_string_leaf() {
        let mut e = registered();
        let keys = e
            .extract_outputs(&fields(json!({"data": {"id": "abc123"}})))
            .unwrap();
        assert_eq!(keys, vec!["widgetId".to_string()]);
        assert_eq!(e.output("widgetId"), Some("abc123"));
        assert_eq!(e.outputs().len(), 1);
    }

    #[test]
    fn missing_key_is_a_traversal_error() {
        let mut e = registered();
        let err = e.extract_outputs(&fields(json!({"data": {}}))).unwrap_err();
        match err {
            ExtractError::PathTraversal { key, failure, .. } => {
                assert_eq!(key, "id");
                assert_eq!(failure, TraversalFailure::MissingKey);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(e.outputs().is_empty());
    }

    #[test]
    fn non_string_leaf_is_unsupported() {
        for body in [
            json!({"data": {"id": 42}}),
            json!({"data": {"id": true}}),
            json!({"data": {"id": null}}),
            json!({"data": {"id": {"nested": "x"}}}),
            json!({"data": {"id": ["x"]}}),
        ] {
            let mut e = registered();
            let err = e.extract_outputs(&fields(body.clone())).unwrap_err();
            assert!(
                matches!(err, ExtractError::UnsupportedLeafType { .. }),
                "{body}: {err:?}"
            );
        }
    }

    #[test]
    fn scalar_before_the_last_segment_is_a_traversal_error() {
        let mut e = EndpointDefinition::post("/w").register_output("a.b.c", "out");
        let err = e.extract_outputs(&fields(json!({"a": "flat"}))).unwrap_err();
        assert_eq!(
            err,
            ExtractError::PathTraversal {
                path: "a.b.c".to_string(),
                key: "b".to_string(),
                failure: TraversalFailure::NotAnObject,
            }
        );
    }

    #[test]
    fn scalar_reached_at_the_last_segment_is_taken_as_the_leaf() {
        let mut e = EndpointDefinition::post("/w").register_output("data.id", "out");
        e.extract_outputs(&fields(json!({"data": "direct"}))).unwrap();
        assert_eq!(e.output("out"), Some("direct"));
    }

    #[test]
    fn single_segment_reads_a_top_level_key() {
        let mut e = EndpointDefinition::post("/w").register_output("id", "out");
        e.extract_outputs(&fields(json!({"id": "top"}))).unwrap();
        assert_eq!(e.output("out"), Some("top"));

        let mut e = EndpointDefinition::post("/w").register_output("id", "out");
        let err = e.extract_outputs(&fields(json!({"name": "x"}))).unwrap_err();
        assert_eq!(
            err,
            ExtractError::PathTraversal {
                path: "id".to_string(),
                key: "id".to_string(),
                failure: TraversalFailure::MissingKey,
            }
        );
    }

    #[test]
    fn all_registrations_are_extracted() {
        let mut e = EndpointDefinition::post("/w")
            .register_output("data.id", "id")
            .register_output("data.owner.name", "owner")
            .register_output("etag", "etag");
        e.extract_outputs(&fields(json!({
            "etag": "v1",
            "data": {"id": "7", "owner": {"name": "ann"}}
        })))
        .unwrap();
        assert_eq!(e.output("id"), Some("7"));
        assert_eq!(e.output("owner"), Some("ann"));
        assert_eq!(e.output("etag"), Some("v1"));
    }

    #[test]
    fn no_registrations_is_a_no_op() {
        let mut e = EndpointDefinition::post("/w");
        assert!(e.extract_outputs(&Map::new()).unwrap().is_empty());
    }
}
