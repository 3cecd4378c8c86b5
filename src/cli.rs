use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "laminar-verify", about = "Laminar tracing demos and service verification CLI")]
pub struct Cli {
    /// Enable verbose output (per-check timing)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full service verification matrix (connectivity + trace export)
    Verify {
        /// Write the run report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Send a demo trace through the Laminar SDK wrapper (nested sync spans)
    DemoSdk,

    /// Send a demo trace through the SDK wrapper with async operations
    DemoSdkAsync,

    /// Send a demo trace via direct OTLP/gRPC export
    DemoGrpc,

    /// Send a demo trace via direct OTLP/HTTP export
    DemoHttp,
}
