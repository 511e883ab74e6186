//! Expression evaluation.
//!
//! Evaluation walks the tokens once against the flat argument list and
//! produces one [`Dispatch`] per base gate. Planning and sending are split:
//! [`evaluate`] validates the argument count and resolves every matrix up
//! front, so a pass that fails sends nothing to the backend.

use qgate_math::Unitary2x2;
use tracing::{debug, trace, warn};

use crate::backend::Backend;
use crate::config::ContextConfig;
use crate::error::{IrError, IrResult};
use crate::expression::Expression;
use crate::qubit::QubitId;
use crate::token::{BaseGate, Token, U4Params};

/// Power and inversion accumulated since the last base gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    /// Product of every pending `pow` exponent.
    pub power: f64,
    /// Parity of pending `inv` tokens.
    pub invert: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            power: 1.0,
            invert: false,
        }
    }
}

impl Modifiers {
    /// Whether nothing is pending.
    pub fn is_neutral(&self) -> bool {
        self.power == 1.0 && !self.invert
    }

    /// Signed exponent for specialised entry points.
    pub fn exponent(&self) -> f64 {
        if self.invert { -self.power } else { self.power }
    }

    /// Apply the power (skipped when it is exactly 1), then the inversion.
    pub fn resolve(&self, matrix: &Unitary2x2, tolerance: f64) -> IrResult<Unitary2x2> {
        let mut resolved = *matrix;
        if self.power != 1.0 {
            resolved = resolved.try_power(self.power, tolerance)?;
        }
        if self.invert {
            resolved = resolved.try_inverse(tolerance)?;
        }
        Ok(resolved)
    }
}

/// Backend entry point selected for one base gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateCall {
    /// `hadamard` / `hadamard_pow`.
    Hadamard {
        /// Signed exponent.
        exponent: f64,
    },
    /// `gate_x` / `gate_x_pow`.
    PauliX {
        /// Signed exponent.
        exponent: f64,
    },
    /// `gate_u4` / `gate_u4_pow`.
    U4 {
        /// Rotation parameters.
        params: U4Params,
        /// Signed exponent.
        exponent: f64,
    },
    /// `gate_matrix` with the resolved matrix.
    Matrix(Unitary2x2),
}

/// A fully resolved gate, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Entry point and its payload.
    pub call: GateCall,
    /// Target qubit.
    pub target: QubitId,
    /// Positive controls in consumption order.
    pub positive: Vec<QubitId>,
    /// Negative controls in consumption order.
    pub negative: Vec<QubitId>,
}

impl Dispatch {
    /// Send this dispatch to `backend`.
    ///
    /// Specialised families use the plain entry point when the exponent is
    /// exactly 1 and the `_pow` form otherwise.
    pub fn send<B: Backend + ?Sized>(&self, backend: &mut B) {
        let (t, pos, neg) = (self.target, &self.positive[..], &self.negative[..]);
        match self.call {
            GateCall::Hadamard { exponent } if exponent == 1.0 => backend.hadamard(t, pos, neg),
            GateCall::Hadamard { exponent } => backend.hadamard_pow(exponent, t, pos, neg),
            GateCall::PauliX { exponent } if exponent == 1.0 => backend.gate_x(t, pos, neg),
            GateCall::PauliX { exponent } => backend.gate_x_pow(exponent, t, pos, neg),
            GateCall::U4 { params, exponent } if exponent == 1.0 => {
                backend.gate_u4(&params, t, pos, neg);
            }
            GateCall::U4 { params, exponent } => {
                backend.gate_u4_pow(&params, exponent, t, pos, neg);
            }
            GateCall::Matrix(ref m) => backend.gate_matrix(m, t, pos, neg),
        }
    }

    /// The matrix this dispatch applies.
    pub fn matrix(&self) -> Unitary2x2 {
        match self.call {
            GateCall::Hadamard { exponent } => raised(Unitary2x2::h(), exponent),
            GateCall::PauliX { exponent } => raised(Unitary2x2::x(), exponent),
            GateCall::U4 { params, exponent } => raised(params.matrix(), exponent),
            GateCall::Matrix(m) => m,
        }
    }
}

fn raised(m: Unitary2x2, exponent: f64) -> Unitary2x2 {
    if exponent == 1.0 { m } else { m.power(exponent) }
}

fn plan_gate(
    gate: &BaseGate,
    modifiers: Modifiers,
    config: &ContextConfig,
) -> IrResult<GateCall> {
    if config.prefer_specialized {
        let exponent = modifiers.exponent();
        match gate {
            BaseGate::Hadamard => return Ok(GateCall::Hadamard { exponent }),
            BaseGate::PauliX => return Ok(GateCall::PauliX { exponent }),
            BaseGate::U4(params) => {
                return Ok(GateCall::U4 {
                    params: *params,
                    exponent,
                });
            }
            BaseGate::Matrix(_) => {}
        }
    }
    let matrix = modifiers.resolve(&gate.matrix(), config.singular_tolerance)?;
    Ok(GateCall::Matrix(matrix))
}

/// Plan the dispatches `expr` produces on `args`.
///
/// Fails with [`IrError::ArgumentCountMismatch`] unless `args` holds exactly
/// one qubit per control marker and base gate, and with [`IrError::Math`]
/// when a matrix cannot be resolved.
pub fn evaluate(
    expr: &Expression,
    args: &[QubitId],
    config: &ContextConfig,
) -> IrResult<Vec<Dispatch>> {
    let expected = expr.arity();
    if args.len() != expected {
        return Err(IrError::ArgumentCountMismatch {
            expression: expr.to_string(),
            expected,
            got: args.len(),
        });
    }

    let mut cursor = args.iter().copied();
    let mut next_arg = || {
        cursor.next().ok_or_else(|| IrError::ArgumentCountMismatch {
            expression: expr.to_string(),
            expected,
            got: args.len(),
        })
    };

    let mut dispatches = Vec::with_capacity(expr.num_gates());
    let mut positive = Vec::new();
    let mut negative = Vec::new();
    let mut modifiers = Modifiers::default();

    for token in expr.tokens() {
        match token {
            Token::PositiveControl => positive.push(next_arg()?),
            Token::NegativeControl => negative.push(next_arg()?),
            Token::Power(e) => modifiers.power *= e,
            Token::Invert => modifiers.invert = !modifiers.invert,
            Token::Gate(gate) => {
                let target = next_arg()?;
                let call = plan_gate(gate, modifiers, config)?;
                trace!(gate = gate.name(), %target, ?modifiers, "planned gate");
                dispatches.push(Dispatch {
                    call,
                    target,
                    positive: std::mem::take(&mut positive),
                    negative: std::mem::take(&mut negative),
                });
                modifiers = Modifiers::default();
            }
        }
    }

    if !modifiers.is_neutral() {
        debug!(?modifiers, "modifiers after the last base gate are discarded");
    }
    if !positive.is_empty() || !negative.is_empty() {
        warn!(
            positive = positive.len(),
            negative = negative.len(),
            "control markers after the last base gate consumed arguments without a target"
        );
    }

    Ok(dispatches)
}
