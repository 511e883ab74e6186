//! The evaluation context.

use qgate_math::Unitary2x2;
use tracing::{debug, info_span, instrument};

use crate::backend::Backend;
use crate::config::ContextConfig;
use crate::error::{IrError, IrResult};
use crate::eval::evaluate;
use crate::expression::Expression;
use crate::qubit::{ClbitRegister, Operand, QubitRegister, flatten};

/// Owns a backend and the qubit and classical-bit counters of one program.
///
/// Expressions are plain values; they reach the backend only through
/// [`Context::apply`]. A context is single-threaded: all state changes go
/// through `&mut self`, and sharing one across threads needs external
/// synchronisation.
///
/// # Example
///
/// ```rust
/// use qgate_ir::{Context, RecordingBackend, operands};
///
/// let mut ctx = Context::with_backend(RecordingBackend::new());
/// let q = ctx.qalloc(2).unwrap();
///
/// ctx.apply(&ctx.h(), [q.qubit(0).unwrap()]).unwrap();
/// let cx = ctx.ctrl(1) * ctx.x();
/// ctx.apply(&cx, operands![q.slice(0, 1).unwrap()]).unwrap();
///
/// assert_eq!(ctx.backend().unwrap().gates().len(), 2);
/// ```
#[derive(Debug)]
pub struct Context<B: Backend> {
    backend: Option<B>,
    config: ContextConfig,
    next_qubit_id: u32,
    next_clbit_id: u32,
}

impl<B: Backend> Default for Context<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Context<B> {
    /// Create a context with no backend and default configuration.
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context with no backend.
    pub fn with_config(config: ContextConfig) -> Self {
        Self {
            backend: None,
            config,
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Create a context dispatching to `backend`.
    pub fn with_backend(backend: B) -> Self {
        let mut ctx = Self::new();
        ctx.register_backend(backend);
        ctx
    }

    /// Set the backend, returning the one it replaces.
    pub fn register_backend(&mut self, backend: B) -> Option<B> {
        debug!(backend = backend.name(), "registering backend");
        self.backend.replace(backend)
    }

    /// The registered backend, if any.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Mutable access to the registered backend.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Consume the context and return its backend.
    pub fn into_backend(self) -> Option<B> {
        self.backend
    }

    /// Configuration in use.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Qubits allocated so far.
    pub fn num_qubits(&self) -> u32 {
        self.next_qubit_id
    }

    /// Classical bits allocated so far.
    pub fn num_clbits(&self) -> u32 {
        self.next_clbit_id
    }

    fn require_backend(&mut self) -> IrResult<&mut B> {
        self.backend.as_mut().ok_or(IrError::BackendNotRegistered)
    }

    // =========================================================================
    // Expression factories
    // =========================================================================

    /// Hadamard gate.
    pub fn h(&self) -> Expression {
        Expression::h()
    }

    /// Pauli-X gate.
    pub fn x(&self) -> Expression {
        Expression::x()
    }

    /// U(θ, φ, λ).
    pub fn u(&self, theta: f64, phi: f64, lambda: f64) -> Expression {
        Expression::u(theta, phi, lambda)
    }

    /// U(θ, φ, λ) with global phase γ.
    pub fn u4(&self, theta: f64, phi: f64, lambda: f64, gamma: f64) -> Expression {
        Expression::u4(theta, phi, lambda, gamma)
    }

    /// Singly-controlled U(θ, φ, λ) with global phase γ.
    pub fn cu(&self, theta: f64, phi: f64, lambda: f64, gamma: f64) -> Expression {
        Expression::cu(theta, phi, lambda, gamma)
    }

    /// Arbitrary unitary.
    pub fn gate(&self, matrix: Unitary2x2) -> Expression {
        Expression::gate(matrix)
    }

    /// Power modifier.
    pub fn pow(&self, exponent: f64) -> Expression {
        Expression::pow(exponent)
    }

    /// Inversion modifier.
    pub fn inv(&self) -> Expression {
        Expression::inv()
    }

    /// Square-root modifier; see [`Expression::sqrt`].
    pub fn sqrt(&self) -> Expression {
        Expression::sqrt()
    }

    /// `count` positive controls.
    pub fn ctrl(&self, count: usize) -> Expression {
        Expression::ctrl(count)
    }

    /// `count` negative controls.
    pub fn negctrl(&self, count: usize) -> Expression {
        Expression::negctrl(count)
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate `size` fresh qubits and notify the backend.
    pub fn qalloc(&mut self, size: u32) -> IrResult<QubitRegister> {
        if size == 0 {
            return Err(IrError::EmptyAllocation);
        }
        let allocated = self.next_qubit_id;
        let limit = self.config.max_qubits.unwrap_or(u32::MAX);
        let exceeded = || IrError::AllocationExceeded {
            requested: size,
            allocated,
            limit,
        };
        let end = allocated.checked_add(size).ok_or_else(exceeded)?;
        if end > limit {
            return Err(exceeded());
        }

        self.require_backend()?.allocate_qubits(size);
        self.next_qubit_id = end;
        debug!(base = allocated, size, "allocated qubits");
        Ok(QubitRegister::new(allocated, size))
    }

    /// Allocate `size` fresh classical bits, initialised to 0.
    pub fn clalloc(&mut self, size: u32) -> IrResult<ClbitRegister> {
        if size == 0 {
            return Err(IrError::EmptyAllocation);
        }
        let base = self.next_clbit_id;
        self.next_clbit_id = base.checked_add(size).ok_or(IrError::AllocationExceeded {
            requested: size,
            allocated: base,
            limit: u32::MAX,
        })?;
        debug!(base, size, "allocated classical bits");
        Ok(ClbitRegister::new(base, size))
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Evaluate `expr` on `operands` and dispatch to the backend.
    ///
    /// Operands are flattened in order. Every check (backend present,
    /// argument count, matrix resolution) runs before the first dispatch, so
    /// an error leaves the backend untouched. Returns the number of gates
    /// dispatched.
    #[instrument(skip_all, fields(expression = %expr))]
    pub fn apply<I>(&mut self, expr: &Expression, operands: I) -> IrResult<usize>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let args = flatten(operands);
        let plan = evaluate(expr, &args, &self.config)?;
        let backend = self.require_backend()?;
        for dispatch in &plan {
            dispatch.send(backend);
        }
        debug!(gates = plan.len(), "dispatched");
        Ok(plan.len())
    }

    /// Reset every operand qubit to |0⟩.
    pub fn reset<I>(&mut self, operands: I) -> IrResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let qubits = flatten(operands);
        let backend = self.require_backend()?;
        for q in qubits {
            backend.reset(q);
        }
        Ok(())
    }

    /// Measure every operand qubit, returning outcomes in operand order.
    pub fn measure<I>(&mut self, operands: I) -> IrResult<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let qubits = flatten(operands);
        let backend = self.require_backend()?;
        Ok(qubits.into_iter().map(|q| backend.measure(q)).collect())
    }

    /// Run a program body against this context.
    pub fn run<F, T>(&mut self, name: &str, body: F) -> IrResult<T>
    where
        F: FnOnce(&mut Self) -> IrResult<T>,
    {
        let backend = self.backend.as_ref().map_or("none", |b| b.name()).to_string();
        let span = info_span!("program", program = name, backend = %backend);
        let _guard = span.enter();
        body(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;
    use crate::recording::{BackendCall, RecordingBackend};

    fn ctx() -> Context<RecordingBackend> {
        Context::with_backend(RecordingBackend::new())
    }

    #[test]
    fn test_qalloc_is_monotonic() {
        let mut ctx = ctx();
        let a = ctx.qalloc(3).unwrap();
        let b = ctx.qalloc(2).unwrap();
        assert_eq!(a.base(), QubitId(0));
        assert_eq!(b.base(), QubitId(3));
        assert_eq!(ctx.num_qubits(), 5);
        assert_eq!(
            ctx.backend().unwrap().calls(),
            &[
                BackendCall::AllocateQubits { count: 3 },
                BackendCall::AllocateQubits { count: 2 },
            ]
        );
    }

    #[test]
    fn test_qalloc_respects_limit() {
        let config = ContextConfig {
            max_qubits: Some(4),
            ..ContextConfig::default()
        };
        let mut ctx = Context::with_config(config);
        ctx.register_backend(RecordingBackend::new());
        ctx.qalloc(3).unwrap();
        assert!(matches!(
            ctx.qalloc(2),
            Err(IrError::AllocationExceeded {
                requested: 2,
                allocated: 3,
                limit: 4
            })
        ));
        assert_eq!(ctx.num_qubits(), 3);
        assert!(ctx.qalloc(1).is_ok());
    }

    #[test]
    fn test_empty_allocation() {
        let mut ctx = ctx();
        assert!(matches!(ctx.qalloc(0), Err(IrError::EmptyAllocation)));
        assert!(matches!(ctx.clalloc(0), Err(IrError::EmptyAllocation)));
    }

    #[test]
    fn test_requires_backend() {
        let mut ctx: Context<RecordingBackend> = Context::new();
        assert!(matches!(ctx.qalloc(1), Err(IrError::BackendNotRegistered)));
        assert_eq!(ctx.num_qubits(), 0);
        assert!(matches!(
            ctx.apply(&Expression::h(), [QubitId(0)]),
            Err(IrError::BackendNotRegistered)
        ));
    }

    #[test]
    fn test_clalloc_counter_is_separate() {
        let mut ctx = ctx();
        ctx.qalloc(2).unwrap();
        let c = ctx.clalloc(2).unwrap();
        assert_eq!(c.clbit(0).unwrap().0, 0);
        assert_eq!(ctx.num_clbits(), 2);
    }

    #[test]
    fn test_measure_and_reset() {
        let mut ctx = Context::with_backend(RecordingBackend::new().with_outcome(1));
        let q = ctx.qalloc(2).unwrap();
        ctx.reset([&q]).unwrap();
        assert_eq!(ctx.measure([&q]).unwrap(), vec![1, 1]);
        let calls = ctx.backend().unwrap().calls();
        assert_eq!(calls[1], BackendCall::Reset { qubit: QubitId(0) });
        assert_eq!(
            calls[4],
            BackendCall::Measure {
                qubit: QubitId(1),
                outcome: 1
            }
        );
    }

    #[test]
    fn test_run_returns_body_result() {
        let mut ctx = ctx();
        let n = ctx
            .run("bell", |ctx| {
                let q = ctx.qalloc(2)?;
                let mut n = ctx.apply(&ctx.h(), [q.qubit(0)?])?;
                n += ctx.apply(&(ctx.ctrl(1) * ctx.x()), [&q])?;
                Ok(n)
            })
            .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn test_register_backend_replaces() {
        let mut ctx = ctx();
        ctx.qalloc(1).unwrap();
        let old = ctx.register_backend(RecordingBackend::new()).unwrap();
        assert_eq!(old.calls().len(), 1);
        assert!(ctx.backend().unwrap().calls().is_empty());
    }
}
