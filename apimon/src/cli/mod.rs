//! CLI module for apimon
//!
//! Provides the `check` and `schema-to-config` subcommands.

pub mod check;
pub mod generate;

use clap::{Parser, Subcommand};

/// API monitor - Probes every operation of an API description and reports its health
#[derive(Parser, Debug)]
#[command(name = "apimon")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    APIMON_CONFIG           Config file for `check` (default: apimon.yaml)
    APIMON_SERVING_URL      Base URL used when a schema has no host (default: http://localhost)
    APIMON_CONCURRENCY      Concurrent requests per target (overrides config)
    APIMON_LOG_LEVEL        Log level (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every configured target once and print the results
    Check(check::CheckArgs),
    /// Generate a monitor config from a Swagger 2.0 schema
    SchemaToConfig(generate::SchemaToConfigArgs),
}
