//! ロギング初期化ユーティリティ

use crate::config::get_env_with_fallback;
use tracing_subscriber::{fmt, EnvFilter};

/// ログレベル未指定時のフィルタ
const DEFAULT_LOG_FILTER: &str = "info";

/// tracingのfmtサブスクライバを初期化
///
/// フィルタは `APIMON_LOG_LEVEL`（旧: `LOG_LEVEL`）、`RUST_LOG`、`info` の順に決定する。
/// 既に初期化済みの場合はエラーを返す。
pub fn init() -> Result<(), String> {
    fmt()
        .with_env_filter(build_filter())
        .with_target(false)
        .try_init()
        .map_err(|e| format!("failed to initialize logging: {}", e))
}

fn build_filter() -> EnvFilter {
    if let Some(level) = get_env_with_fallback("APIMON_LOG_LEVEL", "LOG_LEVEL") {
        if let Ok(filter) = EnvFilter::try_new(&level) {
            return filter;
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
