//! API Monitor Entry Point

use apimon::cli::{check, generate, Cli, Commands};
use apimon::logging;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("{}", e);
    }

    match cli.command {
        Commands::Check(args) => match check::execute(&args).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        Commands::SchemaToConfig(args) => {
            if let Err(e) = generate::execute(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    }
}
