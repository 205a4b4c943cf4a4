//! 不健全通知
//!
//! チェック結果のうち不健全なターゲットだけを通知先へ送る。
//! 通知の失敗はログに残すのみで、チェック結果や終了コードには影響しない。

use apimon_common::types::TargetReport;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// 通知エラー
#[derive(Debug, Error)]
pub enum NotifyError {
    /// 送信に失敗
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// 通知の送信手段
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 1ターゲット分の不健全通知を送る
    async fn send(&self, recipients: &[String], report: &TargetReport) -> Result<(), NotifyError>;
}

/// 警告ログとして出力する通知手段
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipients: &[String], report: &TargetReport) -> Result<(), NotifyError> {
        warn!(
            target_name = %report.target,
            recipients = %recipients.join(", "),
            message = %report.result.message,
            "API is unhealthy"
        );
        Ok(())
    }
}

/// 不健全なチェック結果を通知するリスナー
#[derive(Clone)]
pub struct NotifyHealthIssue {
    notifier: Arc<dyn Notifier>,
    recipients: Vec<String>,
}

impl NotifyHealthIssue {
    /// 新しいリスナーを作成
    pub fn new(notifier: Arc<dyn Notifier>, recipients: Vec<String>) -> Self {
        Self {
            notifier,
            recipients,
        }
    }

    /// 不健全なターゲットを通知し、送信に成功した件数を返す
    pub async fn handle(&self, reports: &[TargetReport]) -> usize {
        if self.recipients.is_empty() {
            return 0;
        }

        let mut sent = 0;
        for report in reports.iter().filter(|r| !r.result.healthy) {
            match self.notifier.send(&self.recipients, report).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    error!(target_name = %report.target, error = %e, "Failed to send notification");
                }
            }
        }
        sent
    }
}
