mod cli;
mod config;
mod connectivity;
mod demo;
mod export;
mod laminar;
mod progress;
mod types;
mod verify;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Credential resolution is the only fatal error path: no probe runs
    // without a usable config.
    let cfg = match config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Verify { report } => {
            match verify::run_verify(&cfg, report.as_deref(), cli.verbose).await {
                Ok(true) => std::process::exit(0),
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        Commands::DemoSdk => finish(demo::run_sdk(&cfg).await),
        Commands::DemoSdkAsync => finish(demo::run_sdk_async(&cfg).await),
        Commands::DemoGrpc => finish(demo::run_grpc(&cfg).await),
        Commands::DemoHttp => finish(demo::run_http(&cfg).await),
    }
}

fn finish(result: anyhow::Result<()>) -> ! {
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
