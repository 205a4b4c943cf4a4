//! API Monitor 共通ライブラリ
//!
//! コア（apimon）と設定生成ツールの双方が扱うデータ型・設定ファイルモデル

#![warn(missing_docs)]

/// 設定ファイルモデル
pub mod config;

/// エラー型定義
pub mod error;

/// 共通型定義
pub mod types;

pub use error::{CommonError, CommonResult};
