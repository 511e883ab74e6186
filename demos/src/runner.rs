//! Program execution with report collection.

use clap::ValueEnum;
use qgate_adapter_trace::TraceBackend;
use qgate_ir::{Backend, BackendCall, Context, ContextConfig, IrResult, RecordingBackend};
use serde::Serialize;
use tracing::info;

use crate::circuits::Program;

/// Which backend receives the dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Keep every call as structured data.
    #[default]
    Record,
    /// Log every call and keep a text transcript.
    Trace,
}

/// Outcome of one program run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Program name.
    pub program: String,
    /// Backend name.
    pub backend: String,
    /// Qubits allocated.
    pub num_qubits: u32,
    /// Classical bits allocated.
    pub num_clbits: u32,
    /// Gate dispatches issued.
    pub num_gates: usize,
    /// Measured values as stored in the program's classical register.
    pub measurements: Vec<u8>,
    /// Structured call log (recording backend only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<BackendCall>,
    /// Text transcript (trace backend only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transcript: Vec<String>,
}

/// Run `program` on a fresh context with the chosen backend.
pub fn execute(
    program: Program,
    size: u32,
    config: ContextConfig,
    backend: BackendKind,
    outcome: u8,
) -> IrResult<Report> {
    match backend {
        BackendKind::Record => {
            let (mut report, backend) =
                run_on(program, size, config, RecordingBackend::new().with_outcome(outcome))?;
            report.num_gates = backend.gates().len();
            report.calls = backend.into_calls();
            Ok(report)
        }
        BackendKind::Trace => {
            let (mut report, backend) =
                run_on(program, size, config, TraceBackend::new().with_outcome(outcome))?;
            report.num_gates = backend.num_dispatches();
            report.transcript = backend.transcript().to_vec();
            Ok(report)
        }
    }
}

fn run_on<B: Backend>(
    program: Program,
    size: u32,
    config: ContextConfig,
    backend: B,
) -> IrResult<(Report, B)> {
    let mut ctx = Context::with_config(config);
    ctx.register_backend(backend);
    let bits = program.run(&mut ctx, size)?;

    let report = Report {
        program: program.to_string(),
        backend: ctx.backend().map_or("none", |b| b.name()).to_string(),
        num_qubits: ctx.num_qubits(),
        num_clbits: ctx.num_clbits(),
        num_gates: 0,
        measurements: bits.values().to_vec(),
        calls: Vec::new(),
        transcript: Vec::new(),
    };
    info!(program = %report.program, qubits = report.num_qubits, "program finished");

    let backend = ctx
        .into_backend()
        .ok_or(qgate_ir::IrError::BackendNotRegistered)?;
    Ok((report, backend))
}
