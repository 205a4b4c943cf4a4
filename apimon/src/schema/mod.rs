//! APIスキーマ
//!
//! Swagger 2.0 形式のAPI記述を読み込んだ後のメモリ上の表現。
//! チェック1回ごとに構築し、以降は読み取り専用で扱う。

pub mod base_url;
pub mod loader;
pub mod parameter;

pub use base_url::resolve_base_url;
pub use loader::load;
pub use parameter::{resolve_value, should_include};

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// パラメータの配置場所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterLocation {
    /// パスセグメント（`{name}` を置換）
    #[serde(rename = "path")]
    Path,
    /// クエリ文字列
    #[serde(rename = "query")]
    Query,
    /// リクエストヘッダー
    #[serde(rename = "header")]
    Header,
    /// フォームボディ
    #[serde(rename = "formData")]
    FormData,
    /// JSONボディ（未対応）
    #[serde(rename = "body")]
    Body,
    /// 未知の配置場所（無視する）
    #[serde(other)]
    Unknown,
}

/// 名前付きのexample
#[derive(Debug, Clone, PartialEq)]
pub struct NamedExample {
    /// example名
    pub name: String,
    /// `value` フィールド
    pub value: Option<Value>,
}

/// オペレーションの1パラメータ宣言
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    /// パラメータ名
    pub name: String,
    /// 配置場所
    pub location: ParameterLocation,
    /// 必須かどうか
    pub required: bool,
    /// `schema.example`
    pub schema_example: Option<Value>,
    /// `examples`（宣言順）
    pub examples: Vec<NamedExample>,
    /// `default`
    pub default_value: Option<Value>,
}

impl ParameterDecl {
    /// 任意パラメータとして作成
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            schema_example: None,
            examples: Vec::new(),
            default_value: None,
        }
    }

    /// 必須にする
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// `schema.example` を設定
    pub fn with_schema_example(mut self, value: Value) -> Self {
        self.schema_example = Some(value);
        self
    }

    /// 名前付きexampleを追加
    pub fn with_named_example(mut self, name: impl Into<String>, value: Value) -> Self {
        self.examples.push(NamedExample {
            name: name.into(),
            value: Some(value),
        });
        self
    }

    /// `default` を設定
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// 1つの (パス, HTTPメソッド) の組
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// `{name}` プレースホルダーを含むパステンプレート
    pub path: String,
    /// HTTPメソッド（大文字）
    pub method: String,
    /// パラメータ宣言（宣言順）
    pub parameters: Vec<ParameterDecl>,
    /// `consumes` に宣言されたメディアタイプ
    pub consumes: Vec<String>,
}

impl Operation {
    /// パラメータなしのオペレーションを作成
    pub fn new(method: impl AsRef<str>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.as_ref().to_ascii_uppercase(),
            parameters: Vec::new(),
            consumes: Vec::new(),
        }
    }

    /// パラメータを追加
    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 受け付けるメディアタイプを追加
    pub fn with_consumes(mut self, content_type: impl Into<String>) -> Self {
        self.consumes.push(content_type.into());
        self
    }
}

/// 読み込み済みのAPI記述
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDescription {
    /// `schemes`
    pub schemes: Vec<String>,
    /// `host`
    pub host: Option<String>,
    /// `basePath`
    pub base_path: Option<String>,
    /// 全オペレーション（宣言順）
    pub operations: Vec<Operation>,
}

impl ApiDescription {
    /// 複数スキームは未対応
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.schemes.len() > 1 {
            return Err(SchemaError::UnsupportedScheme(self.schemes.clone()));
        }
        Ok(())
    }
}
