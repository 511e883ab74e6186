//! Programs run end to end against the trace backend.

use qgate_adapter_trace::TraceBackend;
use qgate_ir::{Context, ContextConfig, IrError, operands};

#[test]
fn ghz_transcript() {
    let mut ctx = Context::with_backend(TraceBackend::new());
    ctx.run("ghz", |ctx| {
        let q = ctx.qalloc(3)?;
        ctx.apply(&ctx.h(), [q.qubit(0)?])?;
        ctx.apply(&(ctx.ctrl(1) * ctx.x()), q.slice(0, 1)?)?;
        ctx.apply(&(ctx.ctrl(1) * ctx.x()), q.slice(1, 2)?)?;
        ctx.measure([&q])?;
        Ok(())
    })
    .unwrap();

    let backend = ctx.into_backend().unwrap();
    assert_eq!(
        backend.transcript(),
        &[
            "[promise_qubits] 3",
            "[hadamard_pow] exp=1 tgt=0 negctrl=[] ctrl=[]",
            "[gate_x_pow] exp=1 tgt=1 negctrl=[] ctrl=[0]",
            "[gate_x_pow] exp=1 tgt=2 negctrl=[] ctrl=[1]",
            "[measure] 0",
            "[measure] 1",
            "[measure] 2",
        ]
    );
    assert_eq!(backend.num_dispatches(), 3);
    assert_eq!(backend.num_unpromised(), 0);
}

#[test]
fn mixed_controls_and_modifiers() {
    let mut ctx = Context::with_backend(TraceBackend::new());
    let q = ctx.qalloc(8).unwrap();
    let e = ctx.negctrl(2) * ctx.ctrl(1) * ctx.inv() * ctx.pow(0.5) * ctx.u(0.5, 0.0, 1.0);
    ctx.apply(
        &e,
        operands![q.slice(1, 2).unwrap(), q.qubit(4).unwrap(), q.qubit(7).unwrap()],
    )
    .unwrap();

    let backend = ctx.backend().unwrap();
    assert_eq!(
        backend.transcript()[1],
        "[gate_u4_pow] th=0.5 ph=0 la=1 ga=0 exp=-0.5 tgt=7 negctrl=[1,2] ctrl=[4]"
    );
}

#[test]
fn matrix_only_configuration() {
    let config = ContextConfig {
        prefer_specialized: false,
        ..ContextConfig::default()
    };
    let mut ctx = Context::with_config(config);
    ctx.register_backend(TraceBackend::new());
    let q = ctx.qalloc(1).unwrap();
    ctx.apply(&ctx.h(), [&q]).unwrap();

    assert!(ctx.backend().unwrap().transcript()[1].starts_with("[gate_matrix]"));
}

#[test]
fn qubit_limit_is_enforced_before_promising() {
    let config = ContextConfig {
        max_qubits: Some(2),
        ..ContextConfig::default()
    };
    let mut ctx = Context::with_config(config);
    ctx.register_backend(TraceBackend::new());

    assert!(matches!(ctx.qalloc(3), Err(IrError::AllocationExceeded { .. })));
    assert_eq!(ctx.backend().unwrap().num_qubits(), 0);
    assert!(ctx.backend().unwrap().transcript().is_empty());
}
