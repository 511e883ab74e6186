//! Mixed Controls Demo
//!
//! Shows negative and positive control markers, `cu`, `sqrt` and `inv`, and
//! compares specialised dispatch with matrix-only dispatch.

use anyhow::Result;
use clap::Parser;

use qgate_demos::circuits::Program;
use qgate_demos::runner::{BackendKind, execute};
use qgate_demos::{init_logging, print_header, print_report, print_result, print_section};
use qgate_ir::ContextConfig;

#[derive(Parser, Debug)]
#[command(name = "demo-controls")]
#[command(about = "Demonstrate control markers and gate modifiers")]
struct Args {
    /// Resolve every gate to a matrix instead of using specialised calls
    #[arg(long)]
    matrix_only: bool,

    /// Outcome returned by every measurement
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
    outcome: u8,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    print_header("Mixed Controls Demo");

    let mut config = ContextConfig::from_env()?;
    if args.matrix_only {
        config.prefer_specialized = false;
    }
    print_section("Configuration");
    print_result("Specialised dispatch", config.prefer_specialized);
    print_result("Singular tolerance", config.singular_tolerance);

    let report = execute(
        Program::MixedControls,
        0,
        config,
        BackendKind::Record,
        args.outcome,
    )?;
    print_report(&report);
    Ok(())
}
