//! ベースURLの決定
//!
//! スキーマの `schemes` / `host` / `basePath` と提供元URLを組み合わせる。

use super::ApiDescription;
use crate::error::SchemaError;
use reqwest::Url;

/// `scheme://host` + basePath を返す
///
/// basePath はそのまま連結するため、末尾の `/` はオペレーションのパスと結合する側で調整する。
pub fn resolve_base_url(
    description: &ApiDescription,
    serving_url: &str,
) -> Result<String, SchemaError> {
    let serving = || {
        Url::parse(serving_url)
            .map_err(|e| SchemaError::InvalidServingUrl(format!("{}: {}", serving_url, e)))
    };

    let scheme = match description.schemes.as_slice() {
        [] => serving()?.scheme().to_string(),
        [scheme] => scheme.clone(),
        schemes => return Err(SchemaError::UnsupportedScheme(schemes.to_vec())),
    };

    let host = match description.host.as_deref().filter(|h| !h.is_empty()) {
        Some(host) => host.to_string(),
        None => serving_host(&serving()?)?,
    };

    let base_path = description
        .base_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("/");

    Ok(format!("{}://{}{}", scheme, host, base_path))
}

/// ホスト名（デフォルト以外のポートがあれば `:port` 付き）
fn serving_host(url: &Url) -> Result<String, SchemaError> {
    let host = url
        .host_str()
        .ok_or_else(|| SchemaError::InvalidServingUrl(format!("{}: missing host", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
