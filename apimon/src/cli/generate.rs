//! schema-to-config サブコマンド
//!
//! Swagger 2.0 スキーマの全オペレーションを展開済みのAPI定義に変換し、
//! `default` ターゲットを1つ持つモニター設定として出力します。

use crate::config::get_serving_url;
use crate::error::MonitorResult;
use crate::request::{RequestBuilderRegistry, RequestIter, SynthesisOptions};
use crate::schema;
use apimon_common::config::{MonitorConfig, DEFAULT_REQUEST_BUILDER, DEFAULT_TARGET_NAME};
use apimon_common::types::ApiCall;
use clap::{ArgAction, Args};
use std::path::{Path, PathBuf};
use tracing::info;

/// schema-to-config サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct SchemaToConfigArgs {
    /// Swagger 2.0 schema file (.json or .yaml)
    pub schema: PathBuf,

    /// Include optional parameters in the generated requests
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub include_opt_params: bool,

    /// Write the config to this file instead of stdout
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Request builder key stored in the config
    #[arg(long, default_value = DEFAULT_REQUEST_BUILDER)]
    pub request_builder: String,

    /// Base URL used when the schema declares no scheme/host
    #[arg(long)]
    pub serving_url: Option<String>,
}

/// スキーマからモニター設定を生成
///
/// 未登録のリクエストビルダーキー、およびいずれかのオペレーションの合成失敗はエラーになる。
pub fn generate_config(
    schema_path: &Path,
    serving_url: &str,
    include_optional_parameters: bool,
    request_builder: &str,
) -> MonitorResult<MonitorConfig> {
    RequestBuilderRegistry::with_defaults(None).resolve(request_builder)?;

    let description = schema::load(schema_path)?;
    let base_url = schema::resolve_base_url(&description, serving_url)?;
    let apis = RequestIter::new(
        &description,
        base_url,
        SynthesisOptions::new(include_optional_parameters),
    )
    .collect::<MonitorResult<Vec<ApiCall>>>()?;

    info!(
        schema = %schema_path.display(),
        apis = apis.len(),
        "Generated monitor config from schema"
    );

    Ok(MonitorConfig {
        request_builder: request_builder.to_string(),
        ..MonitorConfig::with_apis(DEFAULT_TARGET_NAME, apis)
    })
}

/// Execute the schema-to-config command
pub fn execute(args: &SchemaToConfigArgs) -> anyhow::Result<()> {
    let serving_url = args.serving_url.clone().unwrap_or_else(get_serving_url);
    let config = generate_config(
        &args.schema,
        &serving_url,
        args.include_opt_params,
        &args.request_builder,
    )?;

    match &args.output_path {
        Some(path) => {
            config.save(path)?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", config.to_yaml()?),
    }
    Ok(())
}
