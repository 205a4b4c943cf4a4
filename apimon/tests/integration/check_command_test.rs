//! Integration Test: 設定ファイル → 全ターゲットのチェック、スキーマ → 設定生成

use crate::support::{swagger, write_json_schema, write_yaml};
use apimon::cli::check::{execute, run_checks, CheckArgs};
use apimon::cli::generate::generate_config;
use apimon_common::config::MonitorConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_reports_follow_config_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let schema = write_json_schema(&swagger(&server.uri(), json!({ "/down": { "get": {} } })));
    let config = MonitorConfig::from_yaml_str(&format!(
        r#"
notify: false
targets:
  - static:
      apis:
        - method: GET
          url: {uri}/ping
  - live:
      schema:
        path: {schema}
"#,
        uri = server.uri(),
        schema = schema.path().display()
    ))
    .unwrap();

    let reports = run_checks(&config, "http://localhost").await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].target, "static");
    assert!(reports[0].result.healthy);
    assert_eq!(reports[1].target, "live");
    assert!(!reports[1].result.healthy);
    assert!(reports[1].result.message.contains("/down, error: HTTP 500"));
}

#[tokio::test]
async fn test_execute_returns_overall_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = write_yaml(&format!(
        r#"
notify: false
targets:
  - default:
      apis:
        - method: GET
          url: {}/health
"#,
        server.uri()
    ));

    let args = CheckArgs {
        config: config.path().to_path_buf(),
        serving_url: None,
        json: true,
    };
    assert!(execute(&args).await.unwrap());
}

#[tokio::test]
async fn test_execute_fails_for_missing_config() {
    let args = CheckArgs {
        config: "/nonexistent/apimon.yaml".into(),
        serving_url: None,
        json: false,
    };
    let err = execute(&args).await.unwrap_err();
    assert!(err.to_string().contains("Config file not found at"));
}

#[tokio::test]
async fn test_generated_config_probes_same_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let schema = write_json_schema(&swagger(
        &server.uri(),
        json!({
            "/items/{id}": {
                "get": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true,
                          "schema": { "example": 5 } }
                    ]
                }
            }
        }),
    ));

    let mut config =
        generate_config(schema.path(), "http://localhost", true, "form").unwrap();
    config.notify = false;

    // YAMLを経由しても同じ内容で読み戻せる
    let reloaded = MonitorConfig::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(reloaded, config);

    let reports = run_checks(&reloaded, "http://localhost").await.unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].result.healthy, "{}", reports[0].result.message);
}
