use std::time::Duration;

use restchain_core::CollectionDocument;
use restchain_exec::executor::ExecutorConfig;
use serde_json::Value as JsonValue;

use crate::{HttpArgs, TargetArgs};

/// Applies `--set KEY=VALUE` pairs as common inputs, replacing any declared
/// in the document.
pub fn merge_set_inputs(doc: &mut CollectionDocument, set_inputs: &[String]) -> Result<(), String> {
    for s in set_inputs {
        let (k, v) = s
            .split_once('=')
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| format!("invalid --set `{s}`, expected KEY=VALUE"))?;
        doc.inputs
            .insert(k.to_string(), JsonValue::String(v.to_string()));
    }
    Ok(())
}

pub fn apply_target_overrides(doc: &mut CollectionDocument, target: &TargetArgs) {
    if let Some(base_url) = &target.base_url {
        doc.base_url = base_url.clone();
    }
    if let Some(token) = target.bearer_token.as_ref().filter(|t| !t.is_empty()) {
        doc.bearer_token = Some(token.clone());
    }
}

pub fn build_executor_config(http: &HttpArgs) -> ExecutorConfig {
    ExecutorConfig {
        timeout: Duration::from_millis(http.timeout),
        max_response_bytes: http.max_response_bytes,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc() -> CollectionDocument {
        serde_json::from_value(json!({
            "baseUrl": "http://from-doc",
            "inputs": {"tenant": "acme", "region": "eu"},
            "endpoints": []
        }))
        .unwrap()
    }

    #[test]
    fn set_inputs_override_document_inputs() {
        let mut d = doc();
        merge_set_inputs(&mut d, &["tenant=globex".to_string(), "extra=a=b".to_string()]).unwrap();
        assert_eq!(d.inputs["tenant"], json!("globex"));
        assert_eq!(d.inputs["region"], json!("eu"));
        assert_eq!(d.inputs["extra"], json!("a=b"));
    }

    #[test]
    fn malformed_set_is_rejected() {
        let mut d = doc();
        assert!(merge_set_inputs(&mut d, &["novalue".to_string()]).is_err());
        assert!(merge_set_inputs(&mut d, &["=v".to_string()]).is_err());
    }

    #[test]
    fn target_overrides_replace_document_values() {
        let mut d = doc();
        apply_target_overrides(
            &mut d,
            &TargetArgs {
                base_url: Some("http://override".to_string()),
                bearer_token: Some("tok".to_string()),
            },
        );
        assert_eq!(d.base_url, "http://override");
        assert_eq!(d.bearer_token.as_deref(), Some("tok"));
    }

    #[test]
    fn http_args_become_executor_config() {
        let config = build_executor_config(&HttpArgs {
            timeout: 2500,
            max_response_bytes: 10,
        });
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.max_response_bytes, 10);
        assert_eq!(config.default_content_type, "application/json");
    }
}
