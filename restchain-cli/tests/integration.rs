use std::net::TcpListener;

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;

struct ItemsApi<'a> {
    create: Mock<'a>,
    read: Mock<'a>,
}

// Answers the create call only when the bearer token and body match.
fn items_api(server: &MockServer) -> ItemsApi<'_> {
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/tenants/acme/items")
            .header("authorization", "Bearer t0k")
            .json_body(json!({"name": "foo"}));
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(json!({"data": {"id": "abc123"}}));
    });
    let read = server.mock(|when, then| {
        when.method(GET).path("/tenants/acme/items/abc123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"id": "abc123", "name": "foo"}));
    });
    ItemsApi { create, read }
}

fn write_doc(dir: &TempDir, base_url: &str) -> std::path::PathBuf {
    let doc = format!(
        r#"
baseUrl: {base_url}
inputs:
  tenant: acme
endpoints:
  - name: create
    method: POST
    path: /tenants/{{tenant}}/items
    body:
      name: foo
    outputs:
      data.id: newId
  - name: read
    path: /tenants/{{tenant}}/items/{{id}}
    inputs:
      id: {{ $output: create.newId }}
"#
    );
    let path = dir.path().join("collection.yaml");
    std::fs::write(&path, doc).unwrap();
    path
}

#[test]
fn run_chains_extracted_output_into_next_url() {
    let server = MockServer::start();
    let api = items_api(&server);
    let base_url = server.base_url();
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, &base_url);

    let out = Command::cargo_bin("restchain")
        .unwrap()
        .env_remove("RESTCHAIN_BEARER_TOKEN")
        .args(["run", path.to_str().unwrap(), "--format", "json"])
        .args(["--bearer-token", "t0k"])
        .output()
        .unwrap();

    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let report: JsonValue = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["status"], "succeeded");
    assert_eq!(report["endpoints"][0]["name"], "create");
    assert_eq!(report["endpoints"][0]["status"], 201);
    assert_eq!(report["endpoints"][0]["outputs"]["newId"], "abc123");
    assert_eq!(
        report["endpoints"][1]["url"],
        format!("{base_url}/tenants/acme/items/abc123")
    );
    assert_eq!(report["endpoints"][1]["status"], 200);

    api.create.assert();
    api.read.assert();
}

#[test]
fn run_text_output_summarises_endpoints() {
    let server = MockServer::start();
    let api = items_api(&server);
    let base_url = server.base_url();
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, &base_url);

    let out = Command::cargo_bin("restchain")
        .unwrap()
        .env("RESTCHAIN_BEARER_TOKEN", "t0k")
        .args(["run", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&format!("create: POST {base_url}/tenants/acme/items -> 201")));
    assert!(stdout.contains("  newId = abc123"));
    assert!(stdout.contains("ok: 2 endpoints executed"));
    api.create.assert();
    api.read.assert();
}

#[test]
fn run_set_overrides_common_input() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/tenants/globex/items");
        then.status(404).json_body(json!({"error": "not found"}));
    });
    let read = server.mock(|when, then| {
        when.method(GET).path("/tenants/globex/items/");
        then.status(404).json_body(json!({"error": "not found"}));
    });
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, &server.base_url());

    let out = Command::cargo_bin("restchain")
        .unwrap()
        .env_remove("RESTCHAIN_BEARER_TOKEN")
        .args(["run", path.to_str().unwrap(), "--set", "tenant=globex"])
        .output()
        .unwrap();

    // 404 on the create call is recorded and the run continues.
    assert_eq!(out.status.code(), Some(0));
    create.assert();
    read.assert();
}

#[test]
fn run_reports_transport_failure_with_exit_3() {
    let closed = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, &format!("http://{addr}"));

    let out = Command::cargo_bin("restchain")
        .unwrap()
        .args(["run", path.to_str().unwrap(), "--format", "json"])
        .args(["--timeout", "2000"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(3));
    let report: JsonValue = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["status"], "failed");
    assert_eq!(report["endpoints"].as_array().map(Vec::len), Some(0));
    assert!(report["error"]
        .as_str()
        .unwrap()
        .starts_with("endpoint `create` failed: transport failure"));
}

#[test]
fn run_refuses_invalid_document_with_exit_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "baseUrl: http://localhost:1\nendpoints:\n  - name: a\n    path: /items/{id}\n",
    )
    .unwrap();

    Command::cargo_bin("restchain")
        .unwrap()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .code(2);
}
