//! GHZ state preparation.

use qgate_ir::{Backend, ClbitRegister, Context, IrResult};

/// Prepare (|0…0⟩ + |1…1⟩)/√2 on `num_qubits` fresh qubits and measure them.
///
/// Qubit 0 is put in superposition and every other qubit is flipped under
/// its control.
pub fn ghz<B: Backend>(ctx: &mut Context<B>, num_qubits: u32) -> IrResult<ClbitRegister> {
    let q = ctx.qalloc(num_qubits)?;
    let mut c = ctx.clalloc(num_qubits)?;
    ctx.reset([&q])?;

    ctx.apply(&ctx.h(), [q.qubit(0)?])?;
    let cx = ctx.ctrl(1) * ctx.x();
    for i in 1..num_qubits {
        ctx.apply(&cx, [q.qubit(0)?, q.qubit(i)?])?;
    }

    c.store(&ctx.measure([&q])?)?;
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgate_ir::{BackendCall, QubitId, RecordingBackend};

    #[test]
    fn test_ghz_dispatches() {
        let mut ctx = Context::with_backend(RecordingBackend::new());
        let c = ghz(&mut ctx, 4).unwrap();
        assert_eq!(c.len(), 4);

        let gates = ctx.backend().unwrap().gates();
        assert_eq!(gates.len(), 4);
        for (i, call) in gates.iter().enumerate().skip(1) {
            let (target, pos, neg) = call.operands().unwrap();
            assert_eq!(target, QubitId(i as u32));
            assert_eq!(pos, &[QubitId(0)]);
            assert!(neg.is_empty());
            assert!(matches!(call, BackendCall::PauliX { exponent: None, .. }));
        }
    }

    #[test]
    fn test_single_qubit_ghz_is_one_hadamard() {
        let mut ctx = Context::with_backend(RecordingBackend::new());
        ghz(&mut ctx, 1).unwrap();
        assert_eq!(ctx.backend().unwrap().gates().len(), 1);
    }
}
