//! Expression tokens.

use qgate_math::Unitary2x2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the general single-qubit gate U(θ, φ, λ) with global phase γ.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct U4Params {
    /// Rotation angle θ.
    pub theta: f64,
    /// Phase φ.
    pub phi: f64,
    /// Phase λ.
    pub lambda: f64,
    /// Global phase γ.
    pub gamma: f64,
}

impl U4Params {
    /// Create parameters with an explicit global phase.
    pub fn new(theta: f64, phi: f64, lambda: f64, gamma: f64) -> Self {
        Self {
            theta,
            phi,
            lambda,
            gamma,
        }
    }

    /// Synthesize the matrix these parameters describe.
    pub fn matrix(&self) -> Unitary2x2 {
        Unitary2x2::synthesize_with_phase(self.theta, self.phi, self.lambda, self.gamma)
    }
}

/// The unitary carried by a base-gate token.
///
/// Hadamard, Pauli-X and U4 keep their identity so a backend can receive
/// them through a dedicated entry point; `Matrix` is an arbitrary unitary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BaseGate {
    /// Hadamard gate.
    Hadamard,
    /// Pauli-X gate.
    PauliX,
    /// General single-qubit gate from rotation parameters.
    U4(U4Params),
    /// Arbitrary 2x2 unitary.
    Matrix(Unitary2x2),
}

impl BaseGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            BaseGate::Hadamard => "h",
            BaseGate::PauliX => "x",
            BaseGate::U4(_) => "u4",
            BaseGate::Matrix(_) => "unitary",
        }
    }

    /// The unitary this gate applies.
    pub fn matrix(&self) -> Unitary2x2 {
        match self {
            BaseGate::Hadamard => Unitary2x2::h(),
            BaseGate::PauliX => Unitary2x2::x(),
            BaseGate::U4(params) => params.matrix(),
            BaseGate::Matrix(m) => *m,
        }
    }
}

/// One element of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// The next argument is a positive control.
    PositiveControl,
    /// The next argument is a negative control.
    NegativeControl,
    /// Multiply the pending exponent.
    Power(f64),
    /// Toggle pending inversion.
    Invert,
    /// Apply a gate to the next argument, consuming pending modifiers.
    Gate(BaseGate),
}

impl Token {
    /// Whether evaluating this token consumes an argument.
    #[inline]
    pub fn consumes_argument(&self) -> bool {
        matches!(
            self,
            Token::PositiveControl | Token::NegativeControl | Token::Gate(_)
        )
    }

    /// Whether this is a control marker.
    #[inline]
    pub fn is_control(&self) -> bool {
        matches!(self, Token::PositiveControl | Token::NegativeControl)
    }

    /// Whether this is a base-gate token.
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(self, Token::Gate(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::PositiveControl => write!(f, "ctrl"),
            Token::NegativeControl => write!(f, "negctrl"),
            Token::Power(e) => write!(f, "pow({e})"),
            Token::Invert => write!(f, "inv"),
            Token::Gate(BaseGate::U4(p)) => {
                write!(f, "u4({}, {}, {}, {})", p.theta, p.phi, p.lambda, p.gamma)
            }
            Token::Gate(gate) => write!(f, "{}", gate.name()),
        }
    }
}
