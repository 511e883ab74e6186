//! qgate Unitary Algebra
//!
//! Pure functions over single-qubit (2x2) unitaries, consumed by the
//! expression engine in `qgate-ir` and handed as-is to backends.
//!
//! # Operations
//!
//! | Operation | Function | Notes |
//! |-----------|----------|-------|
//! | Synthesis | [`Unitary2x2::synthesize`], [`Unitary2x2::synthesize_with_phase`] | closed-form U(θ, φ, λ) with optional global phase γ |
//! | Power | [`Unitary2x2::power`] | diagonal fast path, otherwise eigendecomposition |
//! | Inverse | [`Unitary2x2::inverse`] | closed-form 2x2 inverse |
//!
//! The checked variants [`Unitary2x2::try_power`] and [`Unitary2x2::try_inverse`]
//! report singular or defective inputs as [`MathError`] instead of returning
//! non-finite entries.
//!
//! # Example
//!
//! ```rust
//! use qgate_math::Unitary2x2;
//!
//! let sqrt_x = Unitary2x2::x().power(0.5);
//! assert!((sqrt_x * sqrt_x).approx_eq(&Unitary2x2::x(), 1e-9));
//!
//! let u = Unitary2x2::synthesize(0.3, 0.2, 1.0);
//! assert!((u * u.inverse()).approx_eq(&Unitary2x2::identity(), 1e-9));
//! ```

pub mod error;
pub mod unitary;

pub use error::{MathError, MathResult};
pub use unitary::{DIAGONAL_TOLERANCE, EPSILON, Unitary2x2};

/// Re-exported so downstream crates name the same complex type.
pub use num_complex::Complex64;
