//! Integration tests for the full pipeline
//!
//! These tests load test files and a seed environment from disk, apply
//! command-line style overrides and run the cases against a scripted HTTP
//! client.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use litmus_application::{
    HttpClient, HttpClientError, HttpRequest, HttpResponse, RunError, RunOptions, RunState,
    TestRunner,
};
use litmus_domain::{Environment, ResponseHeaders, TestCase, parse_override};
use litmus_infrastructure::{load_environment, load_test_cases};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;

type RequestLog = Arc<Mutex<Vec<HttpRequest>>>;

/// Answers by URL path and records every request it sees.
#[derive(Default)]
struct ScriptedClient {
    routes: HashMap<String, (u16, Value)>,
    log: RequestLog,
}

impl ScriptedClient {
    fn route(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(path.to_string(), (status, body));
        self
    }

    fn log(&self) -> RequestLog {
        Arc::clone(&self.log)
    }
}

fn path_of(url: &str) -> String {
    url.split_once("://")
        .and_then(|(_, rest)| rest.find('/').map(|i| rest[i..].to_string()))
        .unwrap_or_else(|| "/".to_string())
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpClientError> {
        self.log.lock().unwrap().push(request.clone());

        let path = path_of(&request.url);
        let Some((status, body)) = self.routes.get(&path) else {
            return Err(HttpClientError::ConnectionFailed(format!(
                "no route for {path}"
            )));
        };

        let mut headers = ResponseHeaders::new();
        headers.append("Content-Type", "application/json");
        headers.append("X-Request-Id", "req-1");

        Ok(HttpResponse::new(
            *status,
            headers,
            serde_json::to_vec(body).unwrap(),
        ))
    }
}

const USERS_TEST: &str = r#"
- name: create user
  method: POST
  url: http://{{base}}/users
  headers:
    Content-Type: application/json
    Authorization: Bearer {{token}}
  body: '{"name":"ada"}'
  bodymod:
    meta.source: litmus
  wants_code: 201
  getters:
    - { path: data.id, type: body, set: user_id }
    - { path: X-Request-Id, type: header, exp: req-1 }

- name: fetch user
  url: http://{{base}}/users/{{user_id}}
  query:
    verbose: "true"
  wants_code: 200
  body:
    data.name: ada
"#;

const PING_TOML: &str = r#"
[[litmus.test]]
name = "ping"
url = "http://{{base}}/ping"
wants_code = 200
"#;

fn write_suite(dir: &Path) {
    fs::write(
        dir.join("env.yaml"),
        "- key: base\n  value: api.local\n- key: token\n  value: t-0\n",
    )
    .unwrap();
    fs::write(dir.join("users_test.yaml"), USERS_TEST).unwrap();
    fs::write(dir.join("zz_ping.toml"), PING_TOML).unwrap();
}

async fn load_suite(dir: &Path, overrides: &[&str]) -> (Environment, Vec<TestCase>) {
    let mut env = load_environment(dir).await.unwrap();
    env.merge(overrides.iter().map(|o| parse_override(o).unwrap()));
    let cases = load_test_cases(dir).await.unwrap();
    (env, cases)
}

fn api() -> ScriptedClient {
    ScriptedClient::default()
        .route("/users", 201, json!({"data": {"id": "u-7"}}))
        .route("/users/u-7", 200, json!({"data": {"name": "ada"}}))
        .route("/ping", 200, json!({}))
}

#[tokio::test]
async fn test_suite_runs_end_to_end() {
    let dir = tempdir().unwrap();
    write_suite(dir.path());
    let (mut env, cases) = load_suite(dir.path(), &[]).await;
    assert_eq!(cases.len(), 3);

    let runner = TestRunner::new(api());
    let report = runner.run(cases, &mut env).await;

    assert!(report.is_success(), "{:?}", report.failure);
    assert_eq!(report.state, RunState::Done);
    assert_eq!(env.get_rendered("user_id"), Some("u-7".to_string()));

    let urls: Vec<&str> = report.passed.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "http://api.local/users",
            "http://api.local/users/u-7",
            "http://api.local/ping"
        ]
    );
}

#[tokio::test]
async fn test_request_reaches_the_wire_resolved() {
    let dir = tempdir().unwrap();
    write_suite(dir.path());
    let (mut env, cases) = load_suite(dir.path(), &["token=t-override"]).await;

    let client = api();
    let log = client.log();
    let runner = TestRunner::new(client);
    let report = runner.run(cases, &mut env).await;
    assert!(report.is_success(), "{:?}", report.failure);

    let seen = log.lock().unwrap().clone();
    let create = &seen[0];
    assert_eq!(create.headers["Authorization"], "Bearer t-override");
    assert_eq!(create.body, r#"{"name":"ada","meta":{"source":"litmus"}}"#);

    let fetch = &seen[1];
    assert_eq!(fetch.query["verbose"], "true");
}

#[tokio::test]
async fn test_name_filter_selects_one_case() {
    let dir = tempdir().unwrap();
    write_suite(dir.path());
    let (mut env, cases) = load_suite(dir.path(), &[]).await;

    let client = api();
    let log = client.log();
    let runner =
        TestRunner::new(client).with_options(RunOptions::default().with_name_filter("ping"));
    let report = runner.run(cases, &mut env).await;

    assert!(report.is_success());
    assert_eq!(report.executed_count(), 1);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failure_stops_the_suite() {
    let dir = tempdir().unwrap();
    write_suite(dir.path());
    let (mut env, cases) = load_suite(dir.path(), &[]).await;

    let client = ScriptedClient::default().route("/users", 500, json!({"error": "boom"}));
    let log = client.log();
    let runner = TestRunner::new(client);
    let report = runner.run(cases, &mut env).await;

    assert_eq!(report.state, RunState::Aborted);
    assert!(report.passed.is_empty());
    let failure = report.failure.expect("suite should abort");
    assert_eq!(failure.name, "create user");
    assert_eq!(
        failure.error,
        RunError::StatusMismatch {
            expected: 201,
            actual: 500
        }
    );
    assert_eq!(
        failure.to_string(),
        "test \"create user\" failed: expected response code: 201 (Created), but got: 500 (Internal Server Error)"
    );
    assert!(!env.contains("user_id"));
    assert_eq!(log.lock().unwrap().len(), 1);
}
