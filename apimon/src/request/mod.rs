//! リクエスト生成
//!
//! - [`synthesis`]: スキーマのオペレーションから [`ApiCall`](apimon_common::types::ApiCall) を合成
//! - [`builder`]: `ApiCall` を送信可能なHTTPリクエストへ変換するビルダーとレジストリ

pub mod builder;
pub mod synthesis;

pub use builder::{FormRequestBuilder, RequestBuilder, RequestBuilderRegistry};
pub use synthesis::{synthesize, RequestIter, SynthesisOptions};
