//! Gate expressions and their composition.
//!
//! An [`Expression`] is an ordered token sequence. Composition appends the
//! right operand's tokens after the left's, which makes expressions a
//! non-commutative monoid with the empty expression as identity:
//!
//! ```text
//!   (e1 * e2) * e3 == e1 * (e2 * e3)      e * 1 == 1 * e == e
//! ```
//!
//! Order is what decides which argument each control marker consumes and
//! which pending modifiers a base gate picks up.

use qgate_math::Unitary2x2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, MulAssign};

use crate::backend::Backend;
use crate::context::Context;
use crate::error::IrResult;
use crate::qubit::Operand;
use crate::token::{BaseGate, Token, U4Params};

/// An ordered, composable sequence of tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// The empty expression, identity of composition.
    pub fn identity() -> Self {
        Self::default()
    }

    /// An expression holding one token.
    pub fn from_token(token: Token) -> Self {
        Self {
            tokens: vec![token],
        }
    }

    /// An expression holding the given tokens in order.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    fn repeated(token: Token, count: usize) -> Self {
        Self {
            tokens: vec![token; count],
        }
    }

    // =========================================================================
    // Base gates
    // =========================================================================

    /// Base gate applying an arbitrary unitary.
    pub fn gate(matrix: Unitary2x2) -> Self {
        Self::from_token(Token::Gate(BaseGate::Matrix(matrix)))
    }

    /// Hadamard gate.
    pub fn h() -> Self {
        Self::from_token(Token::Gate(BaseGate::Hadamard))
    }

    /// Pauli-X gate.
    pub fn x() -> Self {
        Self::from_token(Token::Gate(BaseGate::PauliX))
    }

    /// U(θ, φ, λ) without global phase.
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        Self::u4(theta, phi, lambda, 0.0)
    }

    /// U(θ, φ, λ) with global phase γ.
    pub fn u4(theta: f64, phi: f64, lambda: f64, gamma: f64) -> Self {
        Self::from_token(Token::Gate(BaseGate::U4(U4Params::new(
            theta, phi, lambda, gamma,
        ))))
    }

    /// Singly-controlled U(θ, φ, λ) with global phase γ.
    pub fn cu(theta: f64, phi: f64, lambda: f64, gamma: f64) -> Self {
        Self::ctrl(1) * Self::u4(theta, phi, lambda, gamma)
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Raise the next base gate to `exponent`.
    pub fn pow(exponent: f64) -> Self {
        Self::from_token(Token::Power(exponent))
    }

    /// Invert the next base gate.
    pub fn inv() -> Self {
        Self::from_token(Token::Invert)
    }

    /// Square root of the next base gate, as `pow(0.5)`.
    ///
    /// No inversion is added. Programs written against the older
    /// `pow(0.5) * inv()` form of `sqrt` need an explicit `inv()` to keep
    /// their meaning.
    pub fn sqrt() -> Self {
        Self::pow(0.5)
    }

    /// `count` positive control markers.
    pub fn ctrl(count: usize) -> Self {
        Self::repeated(Token::PositiveControl, count)
    }

    /// `count` negative control markers.
    pub fn negctrl(count: usize) -> Self {
        Self::repeated(Token::NegativeControl, count)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The tokens in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether this is the identity expression.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of arguments an application must supply.
    pub fn arity(&self) -> usize {
        self.tokens.iter().filter(|t| t.consumes_argument()).count()
    }

    /// Number of control markers.
    pub fn num_controls(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_control()).count()
    }

    /// Number of base gates, i.e. dispatches per application.
    pub fn num_gates(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_gate()).count()
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// `self` followed by `other`, as a new expression.
    pub fn concat(&self, other: &Self) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len() + other.tokens.len());
        tokens.extend_from_slice(&self.tokens);
        tokens.extend_from_slice(&other.tokens);
        Self { tokens }
    }

    /// Apply this expression through `ctx`.
    ///
    /// Shorthand for [`Context::apply`].
    pub fn apply<B, I>(&self, ctx: &mut Context<B>, operands: I) -> IrResult<usize>
    where
        B: Backend,
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ctx.apply(self, operands)
    }
}

/// Compose two expressions: `lhs` followed by `rhs`.
pub fn compose(lhs: &Expression, rhs: &Expression) -> Expression {
    lhs.concat(rhs)
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(mut self, rhs: Expression) -> Expression {
        self.tokens.extend(rhs.tokens);
        self
    }
}

impl Mul<&Expression> for &Expression {
    type Output = Expression;

    fn mul(self, rhs: &Expression) -> Expression {
        self.concat(rhs)
    }
}

impl MulAssign for Expression {
    fn mul_assign(&mut self, rhs: Expression) {
        self.tokens.extend(rhs.tokens);
    }
}

impl FromIterator<Token> for Expression {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl std::iter::Product for Expression {
    fn product<I: Iterator<Item = Expression>>(iter: I) -> Self {
        iter.fold(Expression::identity(), |acc, e| acc * e)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return write!(f, "id");
        }
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_preserves_order() {
        let e = Expression::negctrl(2) * Expression::ctrl(1) * Expression::h();
        assert_eq!(
            e.tokens(),
            &[
                Token::NegativeControl,
                Token::NegativeControl,
                Token::PositiveControl,
                Token::Gate(BaseGate::Hadamard),
            ]
        );
    }

    #[test]
    fn test_identity() {
        let e = Expression::ctrl(1) * Expression::x();
        assert_eq!(Expression::identity() * e.clone(), e);
        assert_eq!(e.clone() * Expression::identity(), e);
        assert_eq!(Expression::ctrl(0), Expression::identity());
    }

    #[test]
    fn test_not_commutative() {
        let a = Expression::ctrl(1);
        let b = Expression::h();
        assert_ne!(&a * &b, &b * &a);
    }

    #[test]
    fn test_arity() {
        let e = Expression::negctrl(2)
            * Expression::pow(0.5)
            * Expression::ctrl(1)
            * Expression::h()
            * Expression::inv()
            * Expression::x();
        assert_eq!(e.num_controls(), 3);
        assert_eq!(e.num_gates(), 2);
        assert_eq!(e.arity(), 5);
    }

    #[test]
    fn test_cu_is_controlled_u4() {
        let cu = Expression::cu(0.0, 0.0, 1.0, 0.0);
        assert_eq!(cu, Expression::ctrl(1) * Expression::u(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_product() {
        let parts = vec![Expression::ctrl(1), Expression::pow(0.5), Expression::x()];
        let e: Expression = parts.into_iter().product();
        assert_eq!(e.to_string(), "ctrl * pow(0.5) * x");
    }

    #[test]
    fn test_mul_assign() {
        let mut e = Expression::inv();
        e *= Expression::h();
        assert_eq!(e, Expression::inv() * Expression::h());
    }

    #[test]
    fn test_display_identity() {
        assert_eq!(Expression::identity().to_string(), "id");
    }
}
