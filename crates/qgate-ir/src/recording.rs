//! A backend that records every call it receives.
//!
//! Used by tests and by the demo runner to inspect or dump the dispatch
//! stream produced by a program.

use qgate_math::Unitary2x2;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::qubit::QubitId;
use crate::token::U4Params;

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BackendCall {
    /// `allocate_qubits(count)`.
    AllocateQubits {
        /// Qubits requested.
        count: u32,
    },
    /// `gate_matrix(matrix, target, positive, negative)`.
    GateMatrix {
        /// Resolved matrix.
        matrix: Unitary2x2,
        /// Target qubit.
        target: QubitId,
        /// Positive controls in consumption order.
        positive: Vec<QubitId>,
        /// Negative controls in consumption order.
        negative: Vec<QubitId>,
    },
    /// `hadamard` or `hadamard_pow`.
    Hadamard {
        /// `None` for the plain form.
        exponent: Option<f64>,
        /// Target qubit.
        target: QubitId,
        /// Positive controls.
        positive: Vec<QubitId>,
        /// Negative controls.
        negative: Vec<QubitId>,
    },
    /// `gate_x` or `gate_x_pow`.
    PauliX {
        /// `None` for the plain form.
        exponent: Option<f64>,
        /// Target qubit.
        target: QubitId,
        /// Positive controls.
        positive: Vec<QubitId>,
        /// Negative controls.
        negative: Vec<QubitId>,
    },
    /// `gate_u4` or `gate_u4_pow`.
    U4 {
        /// Rotation parameters.
        params: U4Params,
        /// `None` for the plain form.
        exponent: Option<f64>,
        /// Target qubit.
        target: QubitId,
        /// Positive controls.
        positive: Vec<QubitId>,
        /// Negative controls.
        negative: Vec<QubitId>,
    },
    /// `reset(qubit)`.
    Reset {
        /// Qubit reset.
        qubit: QubitId,
    },
    /// `measure(qubit)` and the outcome returned.
    Measure {
        /// Qubit measured.
        qubit: QubitId,
        /// Outcome handed back to the caller.
        outcome: u8,
    },
}

impl BackendCall {
    /// Whether this call is a gate dispatch.
    pub fn is_gate(&self) -> bool {
        matches!(
            self,
            BackendCall::GateMatrix { .. }
                | BackendCall::Hadamard { .. }
                | BackendCall::PauliX { .. }
                | BackendCall::U4 { .. }
        )
    }

    /// Target, positive and negative controls of a gate dispatch.
    pub fn operands(&self) -> Option<(QubitId, &[QubitId], &[QubitId])> {
        match self {
            BackendCall::GateMatrix {
                target,
                positive,
                negative,
                ..
            }
            | BackendCall::Hadamard {
                target,
                positive,
                negative,
                ..
            }
            | BackendCall::PauliX {
                target,
                positive,
                negative,
                ..
            }
            | BackendCall::U4 {
                target,
                positive,
                negative,
                ..
            } => Some((*target, positive.as_slice(), negative.as_slice())),
            _ => None,
        }
    }

    /// The matrix a gate dispatch applies, with any exponent folded in.
    ///
    /// Specialised calls are resolved the same way the default
    /// [`Backend`] methods resolve them.
    pub fn resolved_matrix(&self) -> Option<Unitary2x2> {
        let raise = |m: Unitary2x2, exponent: &Option<f64>| match exponent {
            Some(e) => m.power(*e),
            None => m,
        };
        match self {
            BackendCall::GateMatrix { matrix, .. } => Some(*matrix),
            BackendCall::Hadamard { exponent, .. } => Some(raise(Unitary2x2::h(), exponent)),
            BackendCall::PauliX { exponent, .. } => Some(raise(Unitary2x2::x(), exponent)),
            BackendCall::U4 {
                params, exponent, ..
            } => Some(raise(params.matrix(), exponent)),
            _ => None,
        }
    }
}

/// Backend that appends every call to an in-memory log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    outcome: u8,
    allocated: u32,
}

impl RecordingBackend {
    /// Create a recorder whose measurements return 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outcome every measurement returns.
    pub fn with_outcome(mut self, outcome: u8) -> Self {
        self.outcome = outcome;
        self
    }

    /// All calls received, in order.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Gate dispatches only, in order.
    pub fn gates(&self) -> Vec<&BackendCall> {
        self.calls.iter().filter(|c| c.is_gate()).collect()
    }

    /// Total qubits announced through `allocate_qubits`.
    pub fn allocated(&self) -> u32 {
        self.allocated
    }

    /// Drop the recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Consume the recorder and return its log.
    pub fn into_calls(self) -> Vec<BackendCall> {
        self.calls
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn allocate_qubits(&mut self, count: u32) {
        self.allocated += count;
        self.calls.push(BackendCall::AllocateQubits { count });
    }

    fn gate_matrix(
        &mut self,
        matrix: &Unitary2x2,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.calls.push(BackendCall::GateMatrix {
            matrix: *matrix,
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn hadamard(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.calls.push(BackendCall::Hadamard {
            exponent: None,
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn hadamard_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.calls.push(BackendCall::Hadamard {
            exponent: Some(exponent),
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn gate_x(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.calls.push(BackendCall::PauliX {
            exponent: None,
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn gate_x_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.calls.push(BackendCall::PauliX {
            exponent: Some(exponent),
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn gate_u4(
        &mut self,
        params: &U4Params,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.calls.push(BackendCall::U4 {
            params: *params,
            exponent: None,
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn gate_u4_pow(
        &mut self,
        params: &U4Params,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.calls.push(BackendCall::U4 {
            params: *params,
            exponent: Some(exponent),
            target,
            positive: positive.to_vec(),
            negative: negative.to_vec(),
        });
    }

    fn reset(&mut self, qubit: QubitId) {
        self.calls.push(BackendCall::Reset { qubit });
    }

    fn measure(&mut self, qubit: QubitId) -> u8 {
        self.calls.push(BackendCall::Measure {
            qubit,
            outcome: self.outcome,
        });
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut backend = RecordingBackend::new().with_outcome(1);
        backend.allocate_qubits(2);
        backend.hadamard(QubitId(0), &[], &[]);
        backend.gate_x(QubitId(1), &[QubitId(0)], &[]);
        assert_eq!(backend.measure(QubitId(1)), 1);

        assert_eq!(backend.calls().len(), 4);
        assert_eq!(backend.gates().len(), 2);
        assert_eq!(backend.allocated(), 2);
        assert_eq!(
            backend.gates()[1].operands(),
            Some((QubitId(1), &[QubitId(0)][..], &[][..]))
        );
    }

    /// Implements only the required methods.
    struct MatrixOnly(Vec<Unitary2x2>);

    impl Backend for MatrixOnly {
        fn name(&self) -> &str {
            "matrix-only"
        }
        fn allocate_qubits(&mut self, _count: u32) {}
        fn gate_matrix(&mut self, m: &Unitary2x2, _: QubitId, _: &[QubitId], _: &[QubitId]) {
            self.0.push(*m);
        }
        fn reset(&mut self, _qubit: QubitId) {}
        fn measure(&mut self, _qubit: QubitId) -> u8 {
            0
        }
    }

    #[test]
    fn test_default_methods_forward_to_gate_matrix() {
        let mut backend = MatrixOnly(Vec::new());
        backend.hadamard(QubitId(0), &[], &[]);
        backend.gate_x_pow(2.0, QubitId(0), &[], &[]);
        backend.gate_u4(&U4Params::new(0.0, 0.0, 1.0, 0.0), QubitId(0), &[], &[]);

        assert_eq!(backend.0.len(), 3);
        assert_eq!(backend.0[0], Unitary2x2::h());
        assert!(backend.0[1].approx_eq(&Unitary2x2::identity(), 1e-9));
        assert_eq!(backend.0[2], Unitary2x2::synthesize(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_resolved_matrix_folds_exponent() {
        let call = BackendCall::Hadamard {
            exponent: Some(-1.0),
            target: QubitId(0),
            positive: vec![],
            negative: vec![],
        };
        let m = call.resolved_matrix().unwrap();
        assert!(m.approx_eq(&Unitary2x2::h(), 1e-9));
        assert!(BackendCall::Reset { qubit: QubitId(0) }.resolved_matrix().is_none());
    }

    #[test]
    fn test_serializes_with_op_tag() {
        let call = BackendCall::Reset { qubit: QubitId(4) };
        let json = serde_json::to_string(&call).unwrap();
        assert_eq!(json, r#"{"op":"reset","qubit":4}"#);
    }
}
