//! Error types for the IR crate.

use qgate_math::MathError;
use thiserror::Error;

/// Errors that can occur while building or applying gate expressions.
///
/// Every variant except [`IrError::Math`] and [`IrError::Config`] is a
/// contract violation by the caller: the operation that detects it fails
/// immediately and leaves the backend untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Flattened argument list does not match the expression.
    #[error("Expression '{expression}' consumes {expected} qubits, got {got}")]
    ArgumentCountMismatch {
        /// Rendered expression, for context.
        expression: String,
        /// Control markers plus base gates in the expression.
        expected: usize,
        /// Length of the flattened argument list.
        got: usize,
    },

    /// Qubit index outside its register.
    #[error("Qubit index {index} out of range for register of size {size}")]
    QubitOutOfRange {
        /// Requested index within the register.
        index: u32,
        /// Register size.
        size: u32,
    },

    /// Classical bit index outside its register.
    #[error("Classical bit index {index} out of range for register of size {size}")]
    ClbitOutOfRange {
        /// Requested index within the register.
        index: u32,
        /// Register size.
        size: u32,
    },

    /// Inclusive slice with `first > last`.
    #[error("Invalid slice [{first}, {last}]")]
    InvalidSlice {
        /// First index.
        first: u32,
        /// Last index (inclusive).
        last: u32,
    },

    /// Number of values does not match the classical bits addressed.
    #[error("Expected {expected} classical values, got {got}")]
    ValueCountMismatch {
        /// Classical bits addressed.
        expected: usize,
        /// Values supplied.
        got: usize,
    },

    /// Allocation of zero bits.
    #[error("Cannot allocate an empty register")]
    EmptyAllocation,

    /// Allocation would pass the configured qubit limit.
    #[error("Allocating {requested} qubits exceeds the limit of {limit} ({allocated} already allocated)")]
    AllocationExceeded {
        /// Qubits requested.
        requested: u32,
        /// Qubits allocated so far.
        allocated: u32,
        /// Configured limit.
        limit: u32,
    },

    /// No backend has been registered with the context.
    #[error("No backend registered - call Context::register_backend() first")]
    BackendNotRegistered,

    /// Matrix resolution failed numerically.
    #[error("Matrix resolution failed: {0}")]
    Math(#[from] MathError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
