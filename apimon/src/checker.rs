//! APIモニター
//!
//! スキーマ読み込み → ベースURL決定 → リクエスト合成・送信 → 集計を1回のチェックとして実行する。
//! どの段階のエラーも [`Reporter`] に渡したうえで不健全な [`CheckResult`] に変換するため、
//! [`ApiMonitor::check`] は常に結果を返す。

use crate::error::{MonitorError, MonitorResult};
use crate::probe::{aggregate, ProbeRunner};
use crate::request::{RequestBuilderRegistry, RequestIter, SynthesisOptions};
use crate::schema;
use apimon_common::config::{MonitorConfig, TargetConfig};
use apimon_common::types::{ApiCall, CheckResult, TargetReport};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// チェック失敗の報告先
pub trait Reporter: Send + Sync {
    /// チェックを中断させたエラーを報告
    fn report(&self, target: &str, error: &MonitorError);
}

/// tracingへエラーログとして出力する報告先
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, target: &str, error: &MonitorError) {
        error!(target_name = %target, error = %error, "API monitor check failed");
    }
}

/// チェック対象
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorTarget {
    /// 実行時にスキーマから合成する
    Schema {
        /// スキーマファイルのパス
        path: PathBuf,
        /// 提供元URL
        serving_url: String,
        /// 合成オプション
        options: SynthesisOptions,
    },
    /// 展開済みのAPI呼び出し定義
    Apis(Vec<ApiCall>),
}

impl MonitorTarget {
    /// 設定のターゲット定義から作成
    ///
    /// ターゲットに提供元URLがなければ `default_serving_url` を使う。
    pub fn from_config(target: &TargetConfig, default_serving_url: &str) -> Self {
        match &target.schema {
            Some(schema) => Self::Schema {
                path: schema.path.clone(),
                serving_url: schema
                    .serving_url
                    .clone()
                    .unwrap_or_else(|| default_serving_url.to_string()),
                options: SynthesisOptions::new(schema.include_optional_parameters)
                    .strict(schema.strict_parameters),
            },
            None => Self::Apis(target.apis.clone()),
        }
    }
}

/// APIモニター（1ターゲット分）
#[derive(Clone)]
pub struct ApiMonitor {
    /// ターゲット名
    name: String,
    /// チェック対象
    target: MonitorTarget,
    /// プローブランナー
    runner: ProbeRunner,
    /// エラー報告先
    reporter: Arc<dyn Reporter>,
}

impl ApiMonitor {
    /// 新しいモニターを作成（報告先は [`TracingReporter`]）
    pub fn new(name: impl Into<String>, target: MonitorTarget, runner: ProbeRunner) -> Self {
        Self {
            name: name.into(),
            target,
            runner,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// 報告先を設定
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// ターゲット名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// チェック対象
    pub fn target(&self) -> &MonitorTarget {
        &self.target
    }

    /// チェックを実行
    pub async fn check(&self) -> CheckResult {
        let started = Instant::now();
        info!(target_name = %self.name, "API monitor check started");

        let result = match self.check_apis().await {
            Ok(result) => result,
            Err(e) => {
                self.reporter.report(&self.name, &e);
                CheckResult::unhealthy(e.to_string())
            }
        };

        info!(
            target_name = %self.name,
            healthy = result.healthy,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API monitor check finished"
        );
        result
    }

    /// チェックを実行し、ターゲット名付きの結果を返す
    pub async fn report(&self) -> TargetReport {
        TargetReport {
            target: self.name.clone(),
            result: self.check().await,
        }
    }

    async fn check_apis(&self) -> MonitorResult<CheckResult> {
        let outcomes = match &self.target {
            MonitorTarget::Schema {
                path,
                serving_url,
                options,
            } => {
                let description = schema::load(path)?;
                let base_url = schema::resolve_base_url(&description, serving_url)?;
                info!(
                    target_name = %self.name,
                    base_url = %base_url,
                    operations = description.operations.len(),
                    "Probing operations from schema"
                );
                self.runner
                    .run(RequestIter::new(&description, base_url, *options))
                    .await?
            }
            MonitorTarget::Apis(apis) => self.runner.run(apis.iter().cloned().map(Ok)).await?,
        };
        Ok(aggregate(&outcomes))
    }
}

/// 設定から全ターゲットのモニターを作成
///
/// リクエストビルダーはここで1回だけ解決し、全モニターで共有する。
pub fn monitors_from_config(
    config: &MonitorConfig,
    registry: &RequestBuilderRegistry,
    client: Client,
    default_serving_url: &str,
    concurrency: usize,
) -> MonitorResult<Vec<ApiMonitor>> {
    let builder = registry.resolve(&config.request_builder)?;
    let runner = ProbeRunner::new(client, builder).with_concurrency(concurrency);

    Ok(config
        .named_targets()
        .map(|(name, target)| {
            ApiMonitor::new(
                name,
                MonitorTarget::from_config(target, default_serving_url),
                runner.clone(),
            )
        })
        .collect())
}
