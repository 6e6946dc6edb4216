use restchain_core::HttpMethod;
use serde_json::{Map, Value as JsonValue};

use crate::executor::http::HttpResponseParts;
use crate::executor::result::{EndpointOutcome, ExecutionError};

/// Parses a response body as a JSON object. Any other top-level value is a
/// parse failure.
pub fn parse_body_json(
    resp: &HttpResponseParts,
) -> Result<Map<String, JsonValue>, ExecutionError> {
    serde_json::from_slice(&resp.body).map_err(ExecutionError::ResponseParse)
}

pub fn into_outcome(
    name: Option<String>,
    method: HttpMethod,
    url: String,
    resp: HttpResponseParts,
) -> EndpointOutcome {
    EndpointOutcome {
        name,
        method,
        url,
        status: resp.status,
        headers: resp.headers,
        body: resp.body,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn response(body: &str) -> HttpResponseParts {
        HttpResponseParts {
            status: 201,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn object_body_parses() {
        let fields = parse_body_json(&response(r#"{"id":"a"}"#)).unwrap();
        assert_eq!(fields.get("id"), Some(&JsonValue::from("a")));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in [r#""not-an-object""#, "42", "[1,2]", "null", "not json", ""] {
            let err = parse_body_json(&response(body)).unwrap_err();
            assert!(matches!(err, ExecutionError::ResponseParse(_)), "{body}: {err:?}");
        }
    }
}
