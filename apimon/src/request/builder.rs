//! リクエストビルダー
//!
//! [`ApiCall`] (method, url, query, headers, body) を `reqwest::Request` に変換する。
//! 使用するビルダーは設定のキーで [`RequestBuilderRegistry`] から起動時に1回だけ選ぶ。

use crate::error::{MonitorError, MonitorResult};
use apimon_common::config::DEFAULT_REQUEST_BUILDER;
use apimon_common::types::{param_pairs, ApiCall};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request};
use std::collections::HashMap;
use std::sync::Arc;

/// `application/x-www-form-urlencoded`
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Content-Type未宣言のフォームボディに [`FORM_URLENCODED`] を補うビルダーのキー
pub const FORM_URLENCODED_BUILDER: &str = "form-urlencoded";

/// HTTPリクエストを組み立てる能力
pub trait RequestBuilder: Send + Sync {
    /// API呼び出し定義から送信可能なリクエストを作る
    fn build(&self, client: &Client, call: &ApiCall) -> MonitorResult<Request>;
}

/// 標準のビルダー
///
/// クエリをURLに付与し、ヘッダーは宣言どおり、ボディはフォームエンコードして載せる。
#[derive(Debug, Clone, Default)]
pub struct FormRequestBuilder {
    default_content_type: Option<String>,
}

impl FormRequestBuilder {
    /// Content-Typeを補わないビルダーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// フォームボディにContent-Typeが宣言されていないときに使う値を設定
    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = Some(content_type.into());
        self
    }
}

impl RequestBuilder for FormRequestBuilder {
    fn build(&self, client: &Client, call: &ApiCall) -> MonitorResult<Request> {
        let url = call.target_url()?;
        let build_error = |reason: String| MonitorError::RequestBuild {
            url: url.clone(),
            reason,
        };

        let method = Method::from_bytes(call.method.to_ascii_uppercase().as_bytes())
            .map_err(|e| build_error(e.to_string()))?;

        let mut request = client.request(method, url.as_str());
        for (name, value) in param_pairs(&call.headers) {
            request = request.header(name, value);
        }

        if let Some(body) = call.body.as_ref().filter(|body| !body.is_empty()) {
            let has_content_type = call
                .headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
            if let (false, Some(content_type)) = (has_content_type, &self.default_content_type) {
                request = request.header(CONTENT_TYPE, content_type.as_str());
            }
            request = request.body(body.encode()?);
        }

        request.build().map_err(|e| build_error(e.to_string()))
    }
}

/// キー → ビルダーのレジストリ
#[derive(Clone, Default)]
pub struct RequestBuilderRegistry {
    builders: HashMap<String, Arc<dyn RequestBuilder>>,
}

impl RequestBuilderRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 標準ビルダーを登録したレジストリを作成
    ///
    /// - `form`: `form_content_type` が指定されていればそれを補う
    /// - `form-urlencoded`: `form_content_type`、なければ [`FORM_URLENCODED`] を補う
    pub fn with_defaults(form_content_type: Option<String>) -> Self {
        let mut registry = Self::new();

        let mut form = FormRequestBuilder::new();
        if let Some(content_type) = &form_content_type {
            form = form.with_default_content_type(content_type.clone());
        }
        registry.register(DEFAULT_REQUEST_BUILDER, Arc::new(form));

        let urlencoded = FormRequestBuilder::new().with_default_content_type(
            form_content_type.unwrap_or_else(|| FORM_URLENCODED.to_string()),
        );
        registry.register(FORM_URLENCODED_BUILDER, Arc::new(urlencoded));

        registry
    }

    /// ビルダーを登録（同じキーは置き換える）
    pub fn register(&mut self, key: impl Into<String>, builder: Arc<dyn RequestBuilder>) {
        self.builders.insert(key.into(), builder);
    }

    /// キーからビルダーを取得
    pub fn resolve(&self, key: &str) -> MonitorResult<Arc<dyn RequestBuilder>> {
        self.builders
            .get(key)
            .cloned()
            .ok_or_else(|| MonitorError::UnknownRequestBuilder(key.to_string()))
    }

    /// 登録済みのキー（ソート済み）
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
