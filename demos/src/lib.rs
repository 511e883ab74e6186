//! qgate Demo Suite
//!
//! Example programs written with the gate-expression layer:
//!
//! - **GHZ**: Hadamard plus a chain of controlled X gates
//! - **Mixed controls**: negative and positive controls, `cu`, `sqrt` and `inv`
//!   across two registers, with slice and index-set arguments
//! - **Hadamard fan-out**: controlled Hadamards from a single control qubit
//!
//! [`runner::execute`] runs any of them against a recording or trace backend
//! and collects a serialisable [`runner::Report`].

pub mod circuits;
pub mod runner;

use console::style;

/// Initialise `tracing-subscriber` with an env filter.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `info`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Format measured bits as a bitstring, bit 0 first.
pub fn bitstring(values: &[u8]) -> String {
    values.iter().map(|v| if *v == 0 { '0' } else { '1' }).collect()
}

/// Print a report in human-readable form.
pub fn print_report(report: &runner::Report) {
    print_section("Run");
    print_result("Program", &report.program);
    print_result("Backend", &report.backend);
    print_result("Qubits", report.num_qubits);
    print_result("Classical bits", report.num_clbits);
    print_result("Gate dispatches", report.num_gates);

    if !report.calls.is_empty() {
        print_section("Dispatches");
        for call in report.calls.iter().filter(|c| c.is_gate()) {
            if let Some((target, pos, neg)) = call.operands() {
                println!(
                    "  {:<10} tgt={target} ctrl={pos:?} negctrl={neg:?}",
                    call_name(call)
                );
            }
        }
    }
    if !report.transcript.is_empty() {
        print_section("Transcript");
        for line in &report.transcript {
            println!("  {line}");
        }
    }

    print_section("Measurements");
    print_result("Bits", bitstring(&report.measurements));
}

fn call_name(call: &qgate_ir::BackendCall) -> String {
    use qgate_ir::BackendCall;
    match call {
        BackendCall::GateMatrix { .. } => "unitary".into(),
        BackendCall::Hadamard { exponent, .. } => with_exponent("h", *exponent),
        BackendCall::PauliX { exponent, .. } => with_exponent("x", *exponent),
        BackendCall::U4 { exponent, .. } => with_exponent("u4", *exponent),
        other => format!("{other:?}"),
    }
}

fn with_exponent(name: &str, exponent: Option<f64>) -> String {
    match exponent {
        Some(e) => format!("{name}^{e}"),
        None => name.to_string(),
    }
}
