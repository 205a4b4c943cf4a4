//! CLI parsing tests

use apimon::cli::{Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_help_available() {
    let err = Cli::try_parse_from(["apimon", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_version_available() {
    let err = Cli::try_parse_from(["apimon", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["apimon"]).is_err());
}

#[test]
fn test_check_args() {
    let cli = Cli::try_parse_from([
        "apimon",
        "check",
        "--config",
        "monitor.yaml",
        "--serving-url",
        "http://staging.internal:8080",
    ])
    .unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.config, PathBuf::from("monitor.yaml"));
            assert_eq!(
                args.serving_url.as_deref(),
                Some("http://staging.internal:8080")
            );
            assert!(!args.json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_schema_to_config_defaults() {
    let cli = Cli::try_parse_from(["apimon", "schema-to-config", "swagger.json"]).unwrap();

    match cli.command {
        Commands::SchemaToConfig(args) => {
            assert_eq!(args.schema, PathBuf::from("swagger.json"));
            assert!(args.include_opt_params);
            assert_eq!(args.request_builder, "form");
            assert!(args.output_path.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_schema_to_config_excludes_optional_params() {
    let cli = Cli::try_parse_from([
        "apimon",
        "schema-to-config",
        "swagger.yaml",
        "--include-opt-params",
        "false",
        "--output-path",
        "out.yaml",
    ])
    .unwrap();

    match cli.command {
        Commands::SchemaToConfig(args) => {
            assert!(!args.include_opt_params);
            assert_eq!(args.output_path, Some(PathBuf::from("out.yaml")));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}
