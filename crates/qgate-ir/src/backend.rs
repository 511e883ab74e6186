//! Backend trait.
//!
//! A backend is the sink that receives resolved gates. The engine hands it
//! the target, the positive and negative control lists, and either a
//! resolved matrix or a pre-identified gate family with an exponent.
//!
//! ## Method table
//!
//! | Method | Required | Called by |
//! |--------|----------|-----------|
//! | `name()` | yes | logging |
//! | `allocate_qubits()` | yes | `Context::qalloc` |
//! | `gate_matrix()` | yes | evaluation (matrix tokens) |
//! | `hadamard()` / `hadamard_pow()` | provided | evaluation (H tokens) |
//! | `gate_x()` / `gate_x_pow()` | provided | evaluation (X tokens) |
//! | `gate_u4()` / `gate_u4_pow()` | provided | evaluation (U4 tokens) |
//! | `reset()` | yes | `Context::reset` |
//! | `measure()` | yes | `Context::measure` |
//!
//! The provided gate methods resolve the matrix with
//! [`Unitary2x2::power`] and forward to `gate_matrix`, so a backend only has
//! to override the families it handles natively.
//!
//! Dispatch methods return nothing: failures inside a backend are the
//! backend's concern and are not propagated through the engine.

use qgate_math::Unitary2x2;

use crate::qubit::QubitId;
use crate::token::U4Params;

/// A gate-dispatch sink.
///
/// Calls arrive synchronously, in program order, exactly once per base gate.
pub trait Backend {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Notification that `count` more qubits were allocated.
    fn allocate_qubits(&mut self, count: u32);

    /// Apply a resolved single-qubit matrix to `target`, conditioned on
    /// `positive` controls being |1⟩ and `negative` controls being |0⟩.
    fn gate_matrix(
        &mut self,
        matrix: &Unitary2x2,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    );

    /// Apply a Hadamard gate.
    fn hadamard(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.gate_matrix(&Unitary2x2::h(), target, positive, negative);
    }

    /// Apply a Hadamard gate raised to `exponent`.
    fn hadamard_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.gate_matrix(&Unitary2x2::h().power(exponent), target, positive, negative);
    }

    /// Apply a Pauli-X gate.
    fn gate_x(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.gate_matrix(&Unitary2x2::x(), target, positive, negative);
    }

    /// Apply a Pauli-X gate raised to `exponent`.
    fn gate_x_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.gate_matrix(&Unitary2x2::x().power(exponent), target, positive, negative);
    }

    /// Apply U(θ, φ, λ) with global phase γ.
    fn gate_u4(
        &mut self,
        params: &U4Params,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.gate_matrix(&params.matrix(), target, positive, negative);
    }

    /// Apply U(θ, φ, λ) with global phase γ, raised to `exponent`.
    fn gate_u4_pow(
        &mut self,
        params: &U4Params,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.gate_matrix(&params.matrix().power(exponent), target, positive, negative);
    }

    /// Reset `qubit` to |0⟩.
    fn reset(&mut self, qubit: QubitId);

    /// Measure `qubit` in the computational basis.
    fn measure(&mut self, qubit: QubitId) -> u8;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn allocate_qubits(&mut self, count: u32) {
        (**self).allocate_qubits(count);
    }

    fn gate_matrix(
        &mut self,
        matrix: &Unitary2x2,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        (**self).gate_matrix(matrix, target, positive, negative);
    }

    fn hadamard(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        (**self).hadamard(target, positive, negative);
    }

    fn hadamard_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        (**self).hadamard_pow(exponent, target, positive, negative);
    }

    fn gate_x(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        (**self).gate_x(target, positive, negative);
    }

    fn gate_x_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        (**self).gate_x_pow(exponent, target, positive, negative);
    }

    fn gate_u4(
        &mut self,
        params: &U4Params,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        (**self).gate_u4(params, target, positive, negative);
    }

    fn gate_u4_pow(
        &mut self,
        params: &U4Params,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        (**self).gate_u4_pow(params, exponent, target, positive, negative);
    }

    fn reset(&mut self, qubit: QubitId) {
        (**self).reset(qubit);
    }

    fn measure(&mut self, qubit: QubitId) -> u8 {
        (**self).measure(qubit)
    }
}
