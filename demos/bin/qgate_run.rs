//! Program Runner
//!
//! Runs a demo program with configuration from a YAML file and `QGATE_*`
//! environment variables, printing the result or dumping it as JSON.

use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use qgate_demos::circuits::Program;
use qgate_demos::runner::{BackendKind, execute};
use qgate_demos::{init_logging, print_header, print_report};
use qgate_ir::ContextConfig;

#[derive(Parser, Debug)]
#[command(name = "qgate-run")]
#[command(about = "Run a qgate demo program")]
struct Args {
    /// Program to run
    #[arg(value_enum)]
    program: Program,

    /// Register size for size-dependent programs
    #[arg(short = 'n', long, default_value = "4")]
    size: u32,

    /// Backend receiving the dispatches
    #[arg(short, long, value_enum, default_value_t = BackendKind::Record)]
    backend: BackendKind,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Outcome returned by every measurement
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
    outcome: u8,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ContextConfig::load(args.config.as_deref()).context("loading configuration")?;
    debug!(?config, "configuration loaded");

    let report = execute(args.program, args.size, config, args.backend, args.outcome)
        .with_context(|| format!("running {}", args.program))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_header("qgate");
        print_report(&report);
    }
    Ok(())
}
