use restchain_core::{
    build_collection, parse_document_str, validate_document, DocumentFormat, Validate,
};

fn minimal_valid_yaml() -> &'static str {
    r#"
baseUrl: https://api.example.com/
inputs:
  tenant: acme
endpoints:
  - name: createItem
    method: POST
    path: /{tenant}/items
    body:
      name: widget
    outputs:
      id: itemId
  - name: readItem
    path: /{tenant}/items/{id}
    inputs:
      id: { $output: createItem.itemId }
"#
}

fn messages(yaml: &str) -> Vec<String> {
    let parsed = parse_document_str(yaml, DocumentFormat::Yaml).unwrap();
    validate_document(&parsed.document)
        .unwrap_err()
        .violations
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_document(&parsed.document).unwrap();
    parsed.document.validate().unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
    assert_eq!(parsed.document.endpoints.len(), 2);
}

#[test]
fn parse_json_and_validate_ok() {
    let json = r#"
{
  "baseUrl": "http://localhost:8080",
  "endpoints": [
    { "name": "health", "path": "/health" }
  ]
}
"#;
    let parsed = parse_document_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
    validate_document(&parsed.document).unwrap();
}

#[test]
fn unknown_fields_are_parse_errors() {
    let yaml = "baseUrl: http://x\nendpoints: []\nworkflows: []\n";
    assert!(parse_document_str(yaml, DocumentFormat::Yaml).is_err());
}

#[test]
fn built_collection_joins_base_url_once() {
    let parsed = parse_document_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let collection = build_collection(&parsed.document).unwrap();
    let id = collection.find("createItem").unwrap();
    assert_eq!(
        collection.resolve_url(id).unwrap(),
        "https://api.example.com/acme/items"
    );
}

#[test]
fn rejects_bad_base_url() {
    let errs = messages("baseUrl: ftp://files\nendpoints: []\n");
    assert_eq!(errs, vec!["baseUrl: unsupported scheme `ftp`".to_string()]);

    let errs = messages("endpoints: []\n");
    assert_eq!(errs, vec!["baseUrl: must not be empty".to_string()]);
}

#[test]
fn rejects_duplicate_and_malformed_names() {
    let errs = messages(
        r#"
baseUrl: http://x
endpoints:
  - name: a
    path: /a
  - name: a
    path: /b
  - name: "has space"
    path: /c
"#,
    );
    assert!(errs.iter().any(|e| e == "endpoints[1].name: duplicate endpoint name `a`"));
    assert!(errs.iter().any(|e| e.starts_with("endpoints[2].name: must match regex")));
}

#[test]
fn rejects_unknown_method_and_unbound_placeholder() {
    let errs = messages(
        r#"
baseUrl: http://x
endpoints:
  - name: a
    method: FETCH
    path: /items/{id}
"#,
    );
    assert_eq!(errs.len(), 2);
    assert!(errs[0].starts_with("endpoints[0].method:"));
    assert_eq!(
        errs[1],
        "endpoints[0].path: placeholder `{id}` has no common or endpoint input"
    );
}

#[test]
fn output_references_must_point_backwards_at_registered_keys() {
    let errs = messages(
        r#"
baseUrl: http://x
endpoints:
  - name: first
    path: /first/{id}
    inputs:
      id: { $output: second.secondId }
  - name: second
    method: POST
    path: /second
    outputs:
      id: secondId
  - name: third
    path: /third/{id}
    inputs:
      id: { $output: second.missing }
  - name: fourth
    path: /fourth/{id}
    inputs:
      id: { $output: ghost.id }
"#,
    );
    assert_eq!(
        errs,
        vec![
            "endpoints[0].inputs.id: endpoint `second` does not run before this endpoint"
                .to_string(),
            "endpoints[2].inputs.id: endpoint `second` registers no output `missing`".to_string(),
            "endpoints[3].inputs.id: unknown endpoint `ghost`".to_string(),
        ]
    );
}

#[test]
fn body_rules() {
    let errs = messages(
        r#"
baseUrl: http://x
endpoints:
  - name: fetch
    method: GET
    path: /items
    body:
      a: 1
    outputs:
      id: itemId
  - name: make
    method: POST
    path: /items
    body:
      list:
        - { $env: HOME }
      nested:
        ref: { $output: nowhere.id }
    outputs:
      "data..id": ""
"#,
    );
    assert_eq!(
        errs,
        vec![
            "endpoints[0].body: GET requests do not send a body".to_string(),
            "endpoints[0].outputs: outputs are only extracted from POST, PUT and PATCH responses, not GET".to_string(),
            "endpoints[1].body.list[0]: references are not supported inside arrays".to_string(),
            "endpoints[1].body.nested.ref: unknown endpoint `nowhere`".to_string(),
            "endpoints[1].outputs.data..id: response path segments must not be empty".to_string(),
            "endpoints[1].outputs.data..id: output key must not be empty".to_string(),
        ]
    );
}
