//! qgate Gate Expressions
//!
//! This crate provides the gate-expression layer of qgate: composable token
//! sequences that decorate single-qubit base gates with controls, powers and
//! inversions, and the evaluation pass that turns an expression plus a flat
//! argument list into backend dispatches.
//!
//! # Core Components
//!
//! - **Tokens**: [`Token`] and [`BaseGate`], the units an expression is made of
//! - **Expressions**: [`Expression`], an ordered token sequence with associative
//!   composition (`*`) and the empty expression as identity
//! - **Evaluation**: [`evaluate`] plans one [`Dispatch`] per base gate
//! - **Context**: [`Context`] owns the backend, the allocation counters and the
//!   [`ContextConfig`]
//! - **Backends**: the [`Backend`] trait and the [`RecordingBackend`] sink
//! - **Registers**: [`QubitRegister`], [`ClbitRegister`] and [`Operand`] for
//!   building argument lists from slices and index sets
//!
//! # Argument consumption
//!
//! Control markers and base gates each take the next argument; `pow` and `inv`
//! take none. For `negctrl(1) * ctrl(1) * h()` applied to `[q1, q2, q3]`:
//!
//! | Token | Argument | Effect |
//! |-------|----------|--------|
//! | `negctrl` | `q1` | negative control |
//! | `ctrl` | `q2` | positive control |
//! | `h` | `q3` | target, dispatch, reset state |
//!
//! # Example: Controlled square root of X
//!
//! ```rust
//! use qgate_ir::{BackendCall, Context, RecordingBackend};
//!
//! let mut ctx = Context::with_backend(RecordingBackend::new());
//! let q = ctx.qalloc(2).unwrap();
//!
//! let csx = ctx.ctrl(1) * ctx.sqrt() * ctx.x();
//! ctx.apply(&csx, [&q]).unwrap();
//!
//! let gates = ctx.backend().unwrap().gates();
//! assert!(matches!(
//!     gates[0],
//!     BackendCall::PauliX { exponent: Some(0.5), .. }
//! ));
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod eval;
pub mod expression;
pub mod qubit;
pub mod recording;
pub mod token;

pub use backend::Backend;
pub use config::ContextConfig;
pub use context::Context;
pub use error::{IrError, IrResult};
pub use eval::{Dispatch, GateCall, Modifiers, evaluate};
pub use expression::{Expression, compose};
pub use qubit::{ClbitId, ClbitRegister, Operand, QubitId, QubitRegister, flatten};
pub use recording::{BackendCall, RecordingBackend};
pub use token::{BaseGate, Token, U4Params};

pub use qgate_math::Unitary2x2;
