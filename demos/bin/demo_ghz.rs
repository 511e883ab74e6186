//! GHZ State Demo
//!
//! Prepares a GHZ state with `h` and `ctrl(1) * x` and shows what the
//! backend receives.

use anyhow::Result;
use clap::Parser;

use qgate_demos::circuits::Program;
use qgate_demos::runner::{BackendKind, execute};
use qgate_demos::{init_logging, print_header, print_report, print_success};
use qgate_ir::ContextConfig;

#[derive(Parser, Debug)]
#[command(name = "demo-ghz")]
#[command(about = "Prepare and measure a GHZ state")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value = "14")]
    qubits: u32,

    /// Backend receiving the dispatches
    #[arg(short, long, value_enum, default_value_t = BackendKind::Trace)]
    backend: BackendKind,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.qubits == 0 {
        anyhow::bail!("a GHZ state needs at least one qubit");
    }

    print_header("GHZ State Demo");
    let report = execute(
        Program::Ghz,
        args.qubits,
        ContextConfig::from_env()?,
        args.backend,
        0,
    )?;
    print_report(&report);
    print_success(&format!("{} gates dispatched", report.num_gates));
    Ok(())
}
