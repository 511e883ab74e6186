//! qgate Trace Backend
//!
//! A backend that performs no simulation. Every call is rendered as one
//! transcript line and emitted through `tracing`, which makes it the
//! reference sink for checking what a program dispatches.
//!
//! # Transcript format
//!
//! | Call | Line |
//! |------|------|
//! | `allocate_qubits` | `[promise_qubits] 3` |
//! | `hadamard(_pow)` | `[hadamard_pow] exp=1 tgt=2 negctrl=[] ctrl=[0,1]` |
//! | `gate_x(_pow)` | `[gate_x_pow] exp=0.5 tgt=1 negctrl=[0] ctrl=[]` |
//! | `gate_u4(_pow)` | `[gate_u4_pow] th=.. ph=.. la=.. ga=.. exp=.. tgt=..` |
//! | `gate_matrix` | `[gate_matrix] m=[..] tgt=..` |
//! | `reset` | `[reset] 0` |
//! | `measure` | `[measure] 0` |
//!
//! # Example
//!
//! ```rust
//! use qgate_adapter_trace::TraceBackend;
//! use qgate_ir::Context;
//!
//! let mut ctx = Context::with_backend(TraceBackend::new());
//! let q = ctx.qalloc(2).unwrap();
//! ctx.apply(&(ctx.ctrl(1) * ctx.x()), [&q]).unwrap();
//!
//! let backend = ctx.backend().unwrap();
//! assert_eq!(backend.transcript()[1], "[gate_x_pow] exp=1 tgt=1 negctrl=[] ctrl=[0]");
//! ```

mod backend;

pub use backend::TraceBackend;
