//! テスト共通ヘルパー

#![allow(dead_code)]

use apimon::probe::ProbeRunner;
use apimon::request::FormRequestBuilder;
use reqwest::Url;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// `host:port`（モックサーバーのURIから）
pub fn host_of(uri: &str) -> String {
    let url = Url::parse(uri).unwrap();
    format!("{}:{}", url.host_str().unwrap(), url.port().unwrap())
}

/// モックサーバーを指すSwagger 2.0ドキュメント
pub fn swagger(uri: &str, paths: Value) -> Value {
    json!({
        "swagger": "2.0",
        "schemes": ["http"],
        "host": host_of(uri),
        "basePath": "/",
        "paths": paths,
    })
}

/// JSONスキーマを一時ファイルに書き出す
pub fn write_json_schema(document: &Value) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string_pretty(document).unwrap().as_bytes())
        .unwrap();
    file
}

/// YAMLを一時ファイルに書き出す
pub fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// 標準ビルダーを使うランナー
pub fn runner(concurrency: usize) -> ProbeRunner {
    ProbeRunner::new(reqwest::Client::new(), Arc::new(FormRequestBuilder::new()))
        .with_concurrency(concurrency)
}
