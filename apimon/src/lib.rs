//! API Monitor
//!
//! Swagger 2.0 のAPI記述から全オペレーションのリクエストを合成し、
//! 同時実行数を制限して送信、結果を健全/不健全の判定にまとめる。

#![warn(missing_docs)]

/// APIモニター（チェック実行のファサード）
pub mod checker;

/// CLIサブコマンド
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 不健全通知
pub mod notify;

/// プローブ実行と結果集計
pub mod probe;

/// リクエスト合成とリクエストビルダー
pub mod request;

/// API記述（スキーマ）の読み込み
pub mod schema;

pub use checker::{ApiMonitor, MonitorTarget, Reporter, TracingReporter};
pub use error::{MonitorError, MonitorResult, ParameterError, SchemaError};
