//! check サブコマンド
//!
//! 設定ファイルの全ターゲットを1回チェックし、結果を表示します。

use crate::checker::monitors_from_config;
use crate::config::{get_serving_url, resolve_concurrency};
use crate::notify::{LogNotifier, NotifyHealthIssue};
use crate::request::RequestBuilderRegistry;
use apimon_common::config::MonitorConfig;
use apimon_common::types::TargetReport;
use clap::Args;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// check サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Monitor config file
    #[arg(short, long, default_value = "apimon.yaml", env = "APIMON_CONFIG")]
    pub config: PathBuf,

    /// Base URL used when a schema declares no scheme/host
    #[arg(long)]
    pub serving_url: Option<String>,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// 全ターゲットを並行してチェックし、設定順に結果を返す
///
/// `notify` が有効なら不健全なターゲットを通知する。
pub async fn run_checks(
    config: &MonitorConfig,
    serving_url: &str,
) -> anyhow::Result<Vec<TargetReport>> {
    let registry = RequestBuilderRegistry::with_defaults(config.form_content_type.clone());
    let monitors = monitors_from_config(
        config,
        &registry,
        reqwest::Client::new(),
        serving_url,
        resolve_concurrency(config),
    )?;

    let reports = join_all(monitors.iter().map(|monitor| monitor.report())).await;

    if config.notify {
        let listener = NotifyHealthIssue::new(
            Arc::new(LogNotifier),
            config.notifications.recipients.clone(),
        );
        let sent = listener.handle(&reports).await;
        if sent > 0 {
            info!(sent = sent, "Health notifications sent");
        }
    }

    Ok(reports)
}

/// Execute the check command
///
/// 全ターゲットが健全なら `true` を返す。
pub async fn execute(args: &CheckArgs) -> anyhow::Result<bool> {
    let config = MonitorConfig::load(&args.config)?;
    let serving_url = args.serving_url.clone().unwrap_or_else(get_serving_url);

    let reports = run_checks(&config, &serving_url).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(reports.iter().all(|report| report.result.healthy))
}

fn print_report(report: &TargetReport) {
    if report.result.healthy {
        println!("{}\tOK", report.target);
    } else {
        println!("{}\tFAILED", report.target);
        for line in report.result.message.lines() {
            println!("    {}", line);
        }
    }
}
