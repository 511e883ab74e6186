//! Control-marker showcases.

use qgate_ir::{Backend, ClbitRegister, Context, IrResult, operands};

/// Mixed-polarity controls, controlled rotations and modifiers over two
/// 8-qubit registers, measured into a 16-bit register.
pub fn mixed_controls<B: Backend>(ctx: &mut Context<B>) -> IrResult<ClbitRegister> {
    let q1 = ctx.qalloc(8)?;
    let q2 = ctx.qalloc(8)?;
    let mut c = ctx.clalloc(16)?;
    ctx.reset([&q1, &q2])?;

    // Negative controls on q1[0..=1], positive on q1[2..=3], target q1[4].
    let e = ctx.negctrl(2) * ctx.ctrl(2) * ctx.h();
    ctx.apply(
        &e,
        operands![q1.qubit(0)?, q1.qubit(1)?, q1.slice(2, 3)?, q1.select(&[4])?],
    )?;

    ctx.apply(&ctx.cu(0.0, 0.0, 1.0, 0.0), q1.slice(0, 1)?)?;
    ctx.apply(&ctx.cu(0.0, 0.0, 0.5, 0.0), q1.slice(0, 1)?)?;

    let e = ctx.ctrl(2) * ctx.sqrt() * ctx.cu(0.0, 0.0, 1.0, 0.0);
    ctx.apply(&e, q1.slice(0, 3)?)?;

    ctx.apply(&(ctx.inv() * ctx.h()), [q1.qubit(0)?])?;
    ctx.apply(&(ctx.ctrl(2) * ctx.h()), q2.slice(0, 2)?)?;

    let low = ctx.measure(q1.slice(0, 7)?)?;
    c.store_slice(0, 7, &low)?;
    let high = ctx.measure(q2.select(&[0, 1])?)?;
    c.store_select(&[8, 9], &high)?;
    Ok(c)
}

/// Hadamard on qubit 0, then a Hadamard on every other qubit controlled by
/// qubit 0.
pub fn hadamard_fanout<B: Backend>(
    ctx: &mut Context<B>,
    num_qubits: u32,
) -> IrResult<ClbitRegister> {
    let q = ctx.qalloc(num_qubits)?;
    let mut c = ctx.clalloc(num_qubits)?;
    ctx.reset([&q])?;

    ctx.apply(&ctx.h(), [q.qubit(0)?])?;
    let ch = ctx.ctrl(1) * ctx.h();
    for i in 1..num_qubits {
        ctx.apply(&ch, q.select(&[0, i])?)?;
    }

    let outcomes = ctx.measure([&q])?;
    c.store_slice(0, num_qubits - 1, &outcomes)?;
    Ok(c)
}
