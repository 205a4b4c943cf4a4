//! 共通型定義
//!
//! ApiCall, ProbeOutcome, CheckResult等のコアデータ型

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CommonResult;

/// 名前→値のマッピング（宣言順を保持する）
pub type ParamMap = serde_json::Map<String, Value>;

/// パラメータ値をリクエストへ載せる文字列表現に変換する
///
/// 配列はカンマ区切り（Swagger 2.0 の `collectionFormat: csv` 相当）、
/// オブジェクトはJSON文字列として扱う。
pub fn render_param_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_param_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// ParamMapを宣言順の(name, value)ペアへ変換する
pub fn param_pairs(params: &ParamMap) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(name, value)| (name.clone(), render_param_value(value)))
        .collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<ParamMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ParamMap>::deserialize(deserializer)?.unwrap_or_default())
}

/// リクエストボディ（フラットなフォームパラメータのみ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// フォームパラメータ（宣言順）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub form_params: ParamMap,
}

impl RequestBody {
    /// フォームパラメータからボディを作成
    pub fn form(form_params: ParamMap) -> Self {
        Self { form_params }
    }

    /// パラメータが空かどうか
    pub fn is_empty(&self) -> bool {
        self.form_params.is_empty()
    }

    /// `application/x-www-form-urlencoded` 形式にエンコード
    pub fn encode(&self) -> CommonResult<String> {
        Ok(serde_urlencoded::to_string(param_pairs(&self.form_params))?)
    }
}

/// 1オペレーション分のAPI呼び出し定義
///
/// スキーマから合成されたリクエスト、または設定ファイルに展開済みの
/// API定義のどちらもこの形で扱う。一度作成した後は変更しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCall {
    /// HTTPメソッド
    pub method: String,
    /// パス置換済みの絶対URL（クエリ文字列は含まない）
    pub url: String,
    /// クエリパラメータ
    #[serde(default, deserialize_with = "null_as_empty")]
    pub query: ParamMap,
    /// ヘッダー（宣言どおりの大文字小文字）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: ParamMap,
    /// フォームボディ（存在しない場合は `None`）
    #[serde(default)]
    pub body: Option<RequestBody>,
}

impl ApiCall {
    /// クエリ・ヘッダー・ボディなしの呼び出し定義を作成
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            query: ParamMap::new(),
            headers: ParamMap::new(),
            body: None,
        }
    }

    /// エンコード済みクエリ文字列（クエリがなければ `None`）
    pub fn query_string(&self) -> CommonResult<Option<String>> {
        if self.query.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_urlencoded::to_string(param_pairs(&self.query))?))
    }

    /// クエリ文字列を付与した最終的なリクエストURL
    pub fn target_url(&self) -> CommonResult<String> {
        match self.query_string()? {
            None => Ok(self.url.clone()),
            Some(query) => {
                let separator = if self.url.contains('?') { '&' } else { '?' };
                Ok(format!("{}{}{}", self.url, separator, query))
            }
        }
    }

    /// 宣言名どおりのヘッダー値
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).map(render_param_value)
    }
}

/// 1プローブの判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// レスポンスを受信し、エラーステータスではなかった
    Succeeded {
        /// 送信したURL
        request_url: String,
        /// 受信したステータスコード
        status: u16,
    },
    /// 接続失敗、またはエラーステータス
    Failed {
        /// 送信したURL
        request_url: String,
        /// 失敗理由
        reason: String,
    },
}

impl ProbeOutcome {
    /// 失敗かどうか
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// 送信したURL
    pub fn request_url(&self) -> &str {
        match self {
            Self::Succeeded { request_url, .. } | Self::Failed { request_url, .. } => request_url,
        }
    }
}

/// チェック全体の判定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// 健全かどうか
    pub healthy: bool,
    /// 診断メッセージ（健全な場合は空文字列）
    pub message: String,
}

impl CheckResult {
    /// 健全な結果
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            message: String::new(),
        }
    }

    /// 不健全な結果
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// ターゲット単位のチェック結果（通知・表示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    /// ターゲット名
    pub target: String,
    /// チェック結果
    pub result: CheckResult,
}
