//! Trace backend implementation.

use tracing::{info, warn};

use qgate_ir::{Backend, QubitId, U4Params};
use qgate_math::Unitary2x2;

/// Backend that logs each call and keeps a transcript.
///
/// Gates whose operands were never promised through `allocate_qubits` are
/// still logged, with a warning.
#[derive(Debug, Clone)]
pub struct TraceBackend {
    name: String,
    num_qubits: u32,
    dispatches: usize,
    unpromised: usize,
    outcome: u8,
    transcript: Vec<String>,
}

impl TraceBackend {
    /// Create a trace backend whose measurements return 0.
    pub fn new() -> Self {
        Self::with_name("trace")
    }

    /// Create a trace backend with a custom name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            dispatches: 0,
            unpromised: 0,
            outcome: 0,
            transcript: Vec::new(),
        }
    }

    /// Set the outcome every measurement returns.
    pub fn with_outcome(mut self, outcome: u8) -> Self {
        self.outcome = outcome;
        self
    }

    /// Qubits promised so far.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Gate dispatches received.
    pub fn num_dispatches(&self) -> usize {
        self.dispatches
    }

    /// Gate dispatches that touched a qubit beyond the promised count.
    pub fn num_unpromised(&self) -> usize {
        self.unpromised
    }

    /// Every line logged so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn emit(&mut self, line: String) {
        info!(backend = %self.name, "{line}");
        self.transcript.push(line);
    }

    fn dispatch(
        &mut self,
        mut line: String,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        line.push_str(&format!(
            " tgt={} negctrl={} ctrl={}",
            target.0,
            render_list(negative),
            render_list(positive)
        ));

        let promised = self.num_qubits;
        if let Some(q) = std::iter::once(&target)
            .chain(positive)
            .chain(negative)
            .find(|q| q.0 >= promised)
        {
            warn!(backend = %self.name, qubit = %q, promised, "dispatch on unpromised qubit");
            self.unpromised += 1;
        }
        self.dispatches += 1;
        self.emit(line);
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn render_list(qubits: &[QubitId]) -> String {
    let ids: Vec<String> = qubits.iter().map(|q| q.0.to_string()).collect();
    format!("[{}]", ids.join(","))
}

impl Backend for TraceBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn allocate_qubits(&mut self, count: u32) {
        self.num_qubits = self.num_qubits.saturating_add(count);
        self.emit(format!("[promise_qubits] {count}"));
    }

    fn gate_matrix(
        &mut self,
        matrix: &Unitary2x2,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        let entries: Vec<String> = matrix.data.iter().map(|z| format!("{z}")).collect();
        let line = format!("[gate_matrix] m=[{}]", entries.join(","));
        self.dispatch(line, target, positive, negative);
    }

    fn hadamard(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.hadamard_pow(1.0, target, positive, negative);
    }

    fn hadamard_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        let line = format!("[hadamard_pow] exp={exponent}");
        self.dispatch(line, target, positive, negative);
    }

    fn gate_x(&mut self, target: QubitId, positive: &[QubitId], negative: &[QubitId]) {
        self.gate_x_pow(1.0, target, positive, negative);
    }

    fn gate_x_pow(
        &mut self,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        let line = format!("[gate_x_pow] exp={exponent}");
        self.dispatch(line, target, positive, negative);
    }

    fn gate_u4(
        &mut self,
        params: &U4Params,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        self.gate_u4_pow(params, 1.0, target, positive, negative);
    }

    fn gate_u4_pow(
        &mut self,
        params: &U4Params,
        exponent: f64,
        target: QubitId,
        positive: &[QubitId],
        negative: &[QubitId],
    ) {
        let line = format!(
            "[gate_u4_pow] th={} ph={} la={} ga={} exp={exponent}",
            params.theta, params.phi, params.lambda, params.gamma
        );
        self.dispatch(line, target, positive, negative);
    }

    fn reset(&mut self, qubit: QubitId) {
        self.emit(format!("[reset] {}", qubit.0));
    }

    fn measure(&mut self, qubit: QubitId) -> u8 {
        self.emit(format!("[measure] {}", qubit.0));
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promise_accumulates() {
        let mut backend = TraceBackend::new();
        backend.allocate_qubits(2);
        backend.allocate_qubits(3);
        assert_eq!(backend.num_qubits(), 5);
        assert_eq!(backend.transcript(), &["[promise_qubits] 2", "[promise_qubits] 3"]);
    }

    #[test]
    fn test_control_lists_are_rendered() {
        let mut backend = TraceBackend::new();
        backend.allocate_qubits(4);
        backend.hadamard_pow(0.5, QubitId(3), &[QubitId(0), QubitId(1)], &[QubitId(2)]);
        assert_eq!(
            backend.transcript()[1],
            "[hadamard_pow] exp=0.5 tgt=3 negctrl=[2] ctrl=[0,1]"
        );
        assert_eq!(backend.num_dispatches(), 1);
        assert_eq!(backend.num_unpromised(), 0);
    }

    #[test]
    fn test_empty_and_single_control_lists() {
        let mut backend = TraceBackend::new();
        backend.allocate_qubits(2);
        backend.gate_x_pow(-1.0, QubitId(1), &[], &[QubitId(0)]);
        assert_eq!(
            backend.transcript()[1],
            "[gate_x_pow] exp=-1 tgt=1 negctrl=[0] ctrl=[]"
        );
    }

    #[test]
    fn test_unpromised_qubit_is_counted() {
        let mut backend = TraceBackend::new();
        backend.allocate_qubits(1);
        backend.gate_x(QubitId(0), &[QubitId(1)], &[]);
        assert_eq!(backend.num_unpromised(), 1);
        assert_eq!(backend.num_dispatches(), 1);
    }

    #[test]
    fn test_plain_forms_log_unit_exponent() {
        let mut backend = TraceBackend::new().with_outcome(1);
        backend.allocate_qubits(1);
        backend.gate_u4(&U4Params::new(0.5, 0.25, 1.0, 0.0), QubitId(0), &[], &[]);
        backend.reset(QubitId(0));
        assert_eq!(backend.measure(QubitId(0)), 1);
        assert_eq!(
            backend.transcript()[1..],
            [
                "[gate_u4_pow] th=0.5 ph=0.25 la=1 ga=0 exp=1 tgt=0 negctrl=[] ctrl=[]",
                "[reset] 0",
                "[measure] 0",
            ]
        );
    }

    #[test]
    fn test_gate_matrix_line() {
        let mut backend = TraceBackend::new();
        backend.allocate_qubits(1);
        backend.gate_matrix(&Unitary2x2::x(), QubitId(0), &[], &[]);
        assert!(backend.transcript()[1].starts_with("[gate_matrix] m=["));
        assert!(backend.transcript()[1].ends_with("tgt=0 negctrl=[] ctrl=[]"));
    }
}
