//! エラー型定義
//!
//! チェック全体を中断させる致命的エラー（thiserror使用）
//!
//! 個々のプローブ失敗はここには含まれない。それらは
//! [`ProbeOutcome::Failed`](apimon_common::types::ProbeOutcome) として集計される。

use apimon_common::CommonError;
use std::path::PathBuf;
use thiserror::Error;

/// スキーマ起因のエラー
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file does not exist
    #[error("File not found at: {0}")]
    NotFound(PathBuf),

    /// Schema file could not be parsed, or parsed to an empty value
    #[error("Schema wasn't decoded properly, check file: {path}: {reason}")]
    Parse {
        /// Schema file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// More than one scheme declared
    #[error("Swagger file definition: multiple schemes not supported ({})", .0.join(", "))]
    UnsupportedScheme(Vec<String>),

    /// More than one consumed content type declared
    #[error("Multiple content types not supported. Path: {path}, method: {method}")]
    UnsupportedContentType {
        /// Operation path template
        path: String,
        /// HTTP method
        method: String,
    },

    /// Serving URL could not be used as a base
    #[error("Invalid serving URL: {0}")]
    InvalidServingUrl(String),
}

/// パラメータ起因のエラー（スキーマ記述の不備）
#[derive(Debug, Error)]
pub enum ParameterError {
    /// Neither example nor default present
    #[error("Cannot extract value for parameter: {0}")]
    Unresolvable(String),

    /// Path parameter without matching placeholder
    #[error("No entry in API path for path parameter. Path: {path}, parameter name: {name}")]
    MissingPathPlaceholder {
        /// Operation path template
        path: String,
        /// Parameter name
        name: String,
    },

    /// Parameter declared `in: body`
    #[error("Parameters in body not supported. Path: {path}, parameter name: {name}")]
    UnsupportedBodyLocation {
        /// Operation path template
        path: String,
        /// Parameter name
        name: String,
    },
}

/// API monitor error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Schema error
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Request could not be turned into an HTTP request
    #[error("Failed to build request for {url}: {reason}")]
    RequestBuild {
        /// Request URL
        url: String,
        /// Reason
        reason: String,
    },

    /// Request builder key not registered
    #[error("Unknown request builder: {0}")]
    UnknownRequestBuilder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias (API monitor)
pub type MonitorResult<T> = Result<T, MonitorError>;
