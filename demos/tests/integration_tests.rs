//! Integration tests for the demo suite.
//!
//! Every program is run through the runner against both backends and the
//! reports are checked for consistency.

use qgate_demos::bitstring;
use qgate_demos::circuits::Program;
use qgate_demos::runner::{BackendKind, execute};
use qgate_ir::{BackendCall, ContextConfig, IrError};

const PROGRAMS: [Program; 3] = [Program::Ghz, Program::MixedControls, Program::HadamardFanout];

/// Both backends see the same number of dispatches.
#[test]
fn test_backends_agree_on_gate_count() {
    for program in PROGRAMS {
        let recorded = execute(program, 5, ContextConfig::default(), BackendKind::Record, 0).unwrap();
        let traced = execute(program, 5, ContextConfig::default(), BackendKind::Trace, 0).unwrap();
        assert_eq!(recorded.num_gates, traced.num_gates, "{program}");
        assert_eq!(recorded.num_qubits, traced.num_qubits, "{program}");
        assert!(recorded.transcript.is_empty());
        assert!(traced.calls.is_empty());
    }
}

/// GHZ over n qubits issues n dispatches and n measurements.
#[test]
fn test_ghz_scaling() {
    for n in 1..=8 {
        let report = execute(Program::Ghz, n, ContextConfig::default(), BackendKind::Record, 1).unwrap();
        assert_eq!(report.num_gates, n as usize);
        assert_eq!(report.measurements, vec![1u8; n as usize]);
        let measures = report
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Measure { .. }))
            .count();
        assert_eq!(measures, n as usize);
    }
}

#[test]
fn test_matrix_only_config_uses_gate_matrix() {
    let config = ContextConfig {
        prefer_specialized: false,
        ..ContextConfig::default()
    };
    let report = execute(Program::MixedControls, 0, config, BackendKind::Record, 0).unwrap();
    assert_eq!(report.num_gates, 6);
    assert!(
        report
            .calls
            .iter()
            .filter(|c| c.is_gate())
            .all(|c| matches!(c, BackendCall::GateMatrix { .. }))
    );
}

#[test]
fn test_qubit_limit_fails_the_run() {
    let config = ContextConfig {
        max_qubits: Some(10),
        ..ContextConfig::default()
    };
    let err = execute(Program::MixedControls, 0, config, BackendKind::Trace, 0).unwrap_err();
    assert!(matches!(err, IrError::AllocationExceeded { limit: 10, .. }));
}

#[test]
fn test_empty_program_is_rejected() {
    let err = execute(Program::Ghz, 0, ContextConfig::default(), BackendKind::Record, 0).unwrap_err();
    assert!(matches!(err, IrError::EmptyAllocation));
}

#[test]
fn test_report_json() {
    let report = execute(Program::Ghz, 2, ContextConfig::default(), BackendKind::Record, 0).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["program"], "ghz");
    assert_eq!(json["backend"], "recording");
    assert_eq!(json["num_gates"], 2);
    assert!(json.get("transcript").is_none());
    assert_eq!(json["calls"][0]["op"], "allocate_qubits");
}

#[test]
fn test_bitstring() {
    assert_eq!(bitstring(&[1, 0, 1]), "101");
    assert_eq!(bitstring(&[]), "");
}
