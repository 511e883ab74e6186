//! Error types for the unitary algebra.

use thiserror::Error;

/// Numerical failures reported by the checked matrix operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    /// Determinant magnitude is below the singularity tolerance.
    #[error("Matrix is singular: |det| = {determinant:e} (tolerance {tolerance:e})")]
    SingularMatrix {
        /// Magnitude of the determinant.
        determinant: f64,
        /// Tolerance it was compared against.
        tolerance: f64,
    },

    /// Eigenvalues coincide and the eigenvector matrix cannot be inverted.
    #[error("Matrix is defective: eigenvalues coincide (|λ1 - λ2| = {separation:e})")]
    DefectiveMatrix {
        /// Distance between the two eigenvalues.
        separation: f64,
    },

    /// The computation produced NaN or infinite entries.
    #[error("Non-finite result raising matrix to power {exponent}")]
    NonFinite {
        /// Exponent that was requested.
        exponent: f64,
    },
}

/// Result type for checked matrix operations.
pub type MathResult<T> = Result<T, MathError>;
