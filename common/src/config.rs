//! 設定管理
//!
//! MonitorConfig, TargetConfig等の設定構造体（YAML）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{CommonError, CommonResult};
use crate::types::ApiCall;

/// デフォルトのリクエストビルダーキー
pub const DEFAULT_REQUEST_BUILDER: &str = "form";

/// デフォルトの同時リクエスト数
pub const DEFAULT_CONCURRENCY: usize = 5;

/// 生成される設定でターゲットに付ける名前
pub const DEFAULT_TARGET_NAME: &str = "default";

/// APIモニター設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 表示名 (デフォルト: "ApiMonitor")
    #[serde(default = "default_name")]
    pub name: String,

    /// 略称 (デフォルト: "apimon")
    #[serde(default = "default_abbreviation")]
    pub abbreviation: String,

    /// 不健全時に通知するか (デフォルト: true)
    #[serde(default = "default_notify")]
    pub notify: bool,

    /// リクエストビルダーのレジストリキー (デフォルト: "form")
    #[serde(default = "default_request_builder")]
    pub request_builder: String,

    /// 同時リクエスト数の上限 (デフォルト: 5)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// フォームボディ送信時にContent-Typeが未宣言の場合に使う値
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_content_type: Option<String>,

    /// 通知設定
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// ターゲット一覧（名前→ターゲット定義のマッピングの列）
    #[serde(default)]
    pub targets: Vec<BTreeMap<String, TargetConfig>>,
}

fn default_name() -> String {
    "ApiMonitor".to_string()
}

fn default_abbreviation() -> String {
    "apimon".to_string()
}

fn default_notify() -> bool {
    true
}

fn default_request_builder() -> String {
    DEFAULT_REQUEST_BUILDER.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            abbreviation: default_abbreviation(),
            notify: default_notify(),
            request_builder: default_request_builder(),
            concurrency: default_concurrency(),
            form_content_type: None,
            notifications: NotificationConfig::default(),
            targets: Vec::new(),
        }
    }
}

impl MonitorConfig {
    /// 展開済みAPI定義を持つターゲットを1つだけ含む設定を作成
    pub fn with_apis(target: impl Into<String>, apis: Vec<ApiCall>) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(target.into(), TargetConfig::from_apis(apis));
        Self {
            targets: vec![entry],
            ..Self::default()
        }
    }

    /// YAML文字列から読み込む
    pub fn from_yaml_str(yaml: &str) -> CommonResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// YAMLファイルから読み込む
    pub fn load(path: &Path) -> CommonResult<Self> {
        if !path.exists() {
            return Err(CommonError::Config(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// YAML文字列へ書き出す
    pub fn to_yaml(&self) -> CommonResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// YAMLファイルへ書き出す
    pub fn save(&self, path: &Path) -> CommonResult<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// (ターゲット名, ターゲット定義) を宣言順に列挙
    pub fn named_targets(&self) -> impl Iterator<Item = (&str, &TargetConfig)> {
        self.targets
            .iter()
            .flat_map(|entry| entry.iter().map(|(name, target)| (name.as_str(), target)))
    }

    /// 設定値を検証
    pub fn validate(&self) -> CommonResult<()> {
        if self.concurrency == 0 {
            return Err(CommonError::Validation(
                "concurrency must be greater than 0".to_string(),
            ));
        }
        for (name, target) in self.named_targets() {
            if target.schema.is_some() && !target.apis.is_empty() {
                return Err(CommonError::Validation(format!(
                    "target '{}' declares both apis and schema",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// ターゲット定義
///
/// 展開済みのAPI定義一覧か、実行時に読み込むスキーマのどちらかを持つ。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// 展開済みのAPI呼び出し定義
    #[serde(default)]
    pub apis: Vec<ApiCall>,

    /// スキーマ駆動の定義
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaTargetConfig>,
}

impl TargetConfig {
    /// 展開済みAPI定義からターゲットを作成
    pub fn from_apis(apis: Vec<ApiCall>) -> Self {
        Self { apis, schema: None }
    }
}

/// スキーマ駆動ターゲットの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaTargetConfig {
    /// スキーマファイルのパス
    pub path: PathBuf,

    /// 提供元URL（スキーマにscheme/hostがない場合に使う）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_url: Option<String>,

    /// 任意パラメータも含めるか (デフォルト: false)
    #[serde(default)]
    pub include_optional_parameters: bool,

    /// 除外した任意パラメータも値を解決できることを要求するか (デフォルト: false)
    #[serde(default)]
    pub strict_parameters: bool,
}

/// 通知設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// 通知先
    #[serde(default)]
    pub recipients: Vec<String>,
}
