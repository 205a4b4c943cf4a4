//! Integration Test: ApiMonitor によるスキーマ駆動チェック

use crate::support::{host_of, runner, swagger, write_json_schema, write_yaml};
use apimon::checker::{ApiMonitor, MonitorTarget, Reporter};
use apimon::error::MonitorError;
use apimon::request::SynthesisOptions;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingReporter {
    count: Mutex<usize>,
}

impl Reporter for CountingReporter {
    fn report(&self, _target: &str, _error: &MonitorError) {
        *self.count.lock().unwrap() += 1;
    }
}

fn schema_monitor(schema_path: PathBuf, options: SynthesisOptions) -> ApiMonitor {
    ApiMonitor::new(
        "live",
        MonitorTarget::Schema {
            path: schema_path,
            serving_url: "http://localhost".to_string(),
            options,
        },
        runner(5),
    )
}

#[tokio::test]
async fn test_healthy_schema_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pets/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let schema = write_json_schema(&swagger(
        &server.uri(),
        json!({
            "/pets": { "get": {} },
            "/pets/{petId}": {
                "get": {
                    "parameters": [
                        { "name": "petId", "in": "path", "required": true, "default": 1 }
                    ]
                }
            }
        }),
    ));

    let result = schema_monitor(schema.path().to_path_buf(), SynthesisOptions::default())
        .check()
        .await;

    assert!(result.healthy, "unexpected message: {}", result.message);
    assert!(result.message.is_empty());
}

#[tokio::test]
async fn test_unhealthy_schema_target_lists_failed_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let schema = write_json_schema(&swagger(
        &server.uri(),
        json!({
            "/ok": { "get": {} },
            "/broken": { "delete": {} }
        }),
    ));

    let result = schema_monitor(schema.path().to_path_buf(), SynthesisOptions::default())
        .check()
        .await;

    assert!(!result.healthy);
    assert_eq!(
        result.message,
        format!(
            "Api URL: {}/broken, error: HTTP 503 Service Unavailable",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_yaml_schema_with_path_level_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let schema = write_yaml(&format!(
        r#"
swagger: "2.0"
schemes: [http]
host: "{}"
paths:
  /orgs/{{org}}/repos:
    parameters:
      - name: org
        in: path
        required: true
        default: acme
    get:
      responses:
        200:
          description: ok
"#,
        host_of(&server.uri())
    ));

    let result = schema_monitor(schema.path().to_path_buf(), SynthesisOptions::default())
        .check()
        .await;

    assert!(result.healthy, "unexpected message: {}", result.message);
}

#[tokio::test]
async fn test_serving_url_used_when_schema_has_no_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let schema = write_json_schema(&json!({
        "swagger": "2.0",
        "paths": { "/status": { "get": {} } }
    }));

    let monitor = ApiMonitor::new(
        "fallback",
        MonitorTarget::Schema {
            path: schema.path().to_path_buf(),
            serving_url: server.uri(),
            options: SynthesisOptions::default(),
        },
        runner(1),
    );

    assert!(monitor.check().await.healthy);
}

#[tokio::test]
async fn test_missing_schema_file_is_reported() {
    let reporter = Arc::new(CountingReporter::default());
    let monitor = schema_monitor(
        PathBuf::from("/nonexistent/apimon/swagger.json"),
        SynthesisOptions::default(),
    )
    .with_reporter(reporter.clone());

    let result = monitor.check().await;

    assert!(!result.healthy);
    assert_eq!(
        result.message,
        "File not found at: /nonexistent/apimon/swagger.json"
    );
    assert_eq!(*reporter.count.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_multiple_schemes_abort_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut document = swagger(&server.uri(), json!({ "/a": { "get": {} } }));
    document["schemes"] = json!(["http", "https"]);
    let schema = write_json_schema(&document);

    let result = schema_monitor(schema.path().to_path_buf(), SynthesisOptions::default())
        .check()
        .await;

    assert!(!result.healthy);
    assert_eq!(
        result.message,
        "Swagger file definition: multiple schemes not supported (http, https)"
    );
}

#[tokio::test]
async fn test_strict_mode_rejects_unresolvable_optional_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let schema = write_json_schema(&swagger(
        &server.uri(),
        json!({
            "/search": {
                "get": {
                    "parameters": [ { "name": "q", "in": "query" } ]
                }
            }
        }),
    ));

    let tolerant = schema_monitor(schema.path().to_path_buf(), SynthesisOptions::new(false))
        .check()
        .await;
    assert!(tolerant.healthy);

    let strict = schema_monitor(
        schema.path().to_path_buf(),
        SynthesisOptions::new(false).strict(true),
    )
    .check()
    .await;
    assert!(!strict.healthy);
    assert_eq!(strict.message, "Cannot extract value for parameter: q");
}
