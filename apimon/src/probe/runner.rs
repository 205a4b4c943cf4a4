//! プローブランナー
//!
//! API呼び出し定義を1件ずつ取り出してリクエストを組み立て、
//! 同時実行数を制限しながら送信する。失敗しても残りのリクエストは全て送る。

use crate::error::{MonitorError, MonitorResult};
use crate::request::RequestBuilder;
use apimon_common::config::DEFAULT_CONCURRENCY;
use apimon_common::types::{ApiCall, ProbeOutcome};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::{Client, Request};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// プローブランナー
///
/// HTTPクライアント（コネクションプール）は全リクエストで共有する。
#[derive(Clone)]
pub struct ProbeRunner {
    /// HTTPクライアント
    client: Client,
    /// リクエストビルダー
    builder: Arc<dyn RequestBuilder>,
    /// 同時実行数の上限
    concurrency: usize,
}

impl ProbeRunner {
    /// 新しいランナーを作成（同時実行数はデフォルトの5）
    pub fn new(client: Client, builder: Arc<dyn RequestBuilder>) -> Self {
        Self {
            client,
            builder,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// 同時実行数を設定（0は1として扱う）
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// 同時実行数の上限
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// 全API呼び出しを実行し、完了順に結果を返す
    ///
    /// 呼び出し定義は送信直前に1件ずつ取り出す。定義の合成やリクエスト組み立てに
    /// 失敗した場合はチェック全体の失敗としてエラーを返す。プローブ自体の失敗
    /// （接続エラー・エラーステータス）は [`ProbeOutcome::Failed`] として返す。
    pub async fn run<I>(&self, calls: I) -> MonitorResult<Vec<ProbeOutcome>>
    where
        I: IntoIterator<Item = MonitorResult<ApiCall>>,
    {
        let outcomes: Vec<ProbeOutcome> = stream::iter(calls)
            .map(|call| async move {
                let call = call?;
                let request = self.builder.build(&self.client, &call)?;
                Ok::<_, MonitorError>(self.probe(request).await)
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        info!(
            total = outcomes.len(),
            failed = failed,
            concurrency = self.concurrency,
            "Probe batch completed"
        );
        Ok(outcomes)
    }

    /// 1リクエストを送信して結果を分類
    async fn probe(&self, request: Request) -> ProbeOutcome {
        let request_url = request.url().to_string();
        let method = request.method().clone();

        match self.client.execute(request).await {
            Ok(response)
                if response.status().is_client_error() || response.status().is_server_error() =>
            {
                let reason = format!("HTTP {}", response.status());
                warn!(
                    method = %method,
                    url = %request_url,
                    error = %reason,
                    "Probe failed"
                );
                ProbeOutcome::Failed {
                    request_url,
                    reason,
                }
            }
            Ok(response) => {
                let status = response.status().as_u16();
                debug!(
                    method = %method,
                    url = %request_url,
                    status = status,
                    "Probe succeeded"
                );
                ProbeOutcome::Succeeded {
                    request_url,
                    status,
                }
            }
            Err(e) => {
                let reason = format!("No response: {}", e);
                warn!(
                    method = %method,
                    url = %request_url,
                    error = %e,
                    "Probe failed"
                );
                ProbeOutcome::Failed {
                    request_url,
                    reason,
                }
            }
        }
    }
}
