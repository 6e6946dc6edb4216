use std::collections::BTreeMap;

use restchain_core::{Collection, EndpointId};

use crate::executor::http::HttpRequestParts;
use crate::executor::result::ExecutionError;
use crate::executor::types::ExecutorConfig;

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";

/// Resolves URL, query, body and headers for one endpoint against the
/// current state of `collection`.
pub fn build_request(
    collection: &Collection,
    id: EndpointId,
    config: &ExecutorConfig,
) -> Result<HttpRequestParts, ExecutionError> {
    let endpoint = collection
        .endpoint(id)
        .ok_or(ExecutionError::UnknownEndpoint { endpoint: id })?;

    let raw = collection.resolve_url(id)?;
    let mut url = url::Url::parse(&raw).map_err(|e| ExecutionError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    if !endpoint.query().is_empty() {
        url.query_pairs_mut().extend_pairs(endpoint.query().iter());
    }

    let body = if endpoint.method().carries_body() {
        endpoint.body_bytes(collection)?
    } else {
        None
    };

    let mut headers = endpoint.headers().clone();
    if body.is_some() && !has_header(&headers, CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE.to_string(), config.default_content_type.clone());
    }
    if let Some(token) = collection.bearer_token() {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(AUTHORIZATION));
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
    }

    Ok(HttpRequestParts {
        method: endpoint.method(),
        url,
        headers,
        body,
    })
}

fn has_header(headers: &BTreeMap<String, String>, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use restchain_core::{EndpointDefinition, HttpMethod, Provider, RequestBody};

    use super::*;

    fn collection_with(endpoint: EndpointDefinition) -> (Collection, EndpointId) {
        let mut c = Collection::new().with_base_url("http://api.test/");
        let id = c.add_endpoint(endpoint);
        (c, id)
    }

    #[test]
    fn appends_query_parameters() {
        let (c, id) = collection_with(
            EndpointDefinition::get("/items")
                .with_query_param("page", "2")
                .with_query_param("q", "a b"),
        );
        let req = build_request(&c, id, &ExecutorConfig::default()).unwrap();
        assert_eq!(req.url.as_str(), "http://api.test/items?page=2&q=a+b");
        assert_eq!(req.body, None);
    }

    #[test]
    fn body_only_for_payload_methods() {
        let body = RequestBody::new().with_literal("name", "foo");
        let (c, id) = collection_with(EndpointDefinition::get("/items").with_body(body.clone()));
        let req = build_request(&c, id, &ExecutorConfig::default()).unwrap();
        assert_eq!(req.body, None);
        assert!(req.headers.is_empty());

        let (c, id) = collection_with(EndpointDefinition::patch("/items/1").with_body(body));
        let req = build_request(&c, id, &ExecutorConfig::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body.as_deref(), Some(br#"{"name":"foo"}"#.as_slice()));
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn declared_content_type_is_kept() {
        let (c, id) = collection_with(
            EndpointDefinition::post("/items")
                .with_header("content-type", "application/merge-patch+json")
                .with_body_field("name", Provider::constant("x")),
        );
        let req = build_request(&c, id, &ExecutorConfig::default()).unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.headers.get("content-type").map(String::as_str),
            Some("application/merge-patch+json")
        );
    }

    #[test]
    fn bearer_token_replaces_declared_authorization() {
        let (c, id) = collection_with(
            EndpointDefinition::get("/me").with_header("authorization", "Basic abc"),
        );
        let c = c.with_bearer_token("t0k");
        let req = build_request(&c, id, &ExecutorConfig::default()).unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer t0k")
        );
    }

    #[test]
    fn unparseable_url_is_reported() {
        let mut c = Collection::new().with_base_url("not a url");
        let id = c.add_endpoint(EndpointDefinition::get("/x"));
        let err = build_request(&c, id, &ExecutorConfig::default()).unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidUrl { .. }));
    }
}
