//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, plus the runtime settings
//! that may be overridden from the environment.

use apimon_common::config::{MonitorConfig, DEFAULT_CONCURRENCY};

/// Serving URL used when neither the config nor the environment provides one
pub const DEFAULT_SERVING_URL: &str = "http://localhost";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use apimon::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("APIMON_SERVING_URL", "APP_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 提供元URLを取得
///
/// 環境変数 `APIMON_SERVING_URL`（旧: `APP_URL`）から取得し、
/// 未設定の場合は `http://localhost` を返す。
pub fn get_serving_url() -> String {
    get_env_with_fallback_or("APIMON_SERVING_URL", "APP_URL", DEFAULT_SERVING_URL)
}

/// 同時リクエスト数を決定
///
/// 環境変数 `APIMON_CONCURRENCY`（旧: `HEALTH_API_CONCURRENCY`）が設定されていれば
/// 設定ファイルの値より優先する。0 は無効値として無視する。
pub fn resolve_concurrency(config: &MonitorConfig) -> usize {
    let configured = if config.concurrency == 0 {
        DEFAULT_CONCURRENCY
    } else {
        config.concurrency
    };
    match get_env_with_fallback_parse("APIMON_CONCURRENCY", "HEALTH_API_CONCURRENCY", 0usize) {
        0 => configured,
        value => value,
    }
}
