//! Qubit and classical bit types, registers and argument flattening.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Unique identifier for a qubit within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

fn check_slice(
    first: u32,
    last: u32,
    size: u32,
    out_of_range: fn(u32, u32) -> IrError,
) -> IrResult<()> {
    if first > last {
        return Err(IrError::InvalidSlice { first, last });
    }
    if last >= size {
        return Err(out_of_range(last, size));
    }
    Ok(())
}

fn qubit_out_of_range(index: u32, size: u32) -> IrError {
    IrError::QubitOutOfRange { index, size }
}

fn clbit_out_of_range(index: u32, size: u32) -> IrError {
    IrError::ClbitOutOfRange { index, size }
}

/// A contiguous block of qubits drawn from a context's counter.
///
/// Indexing is relative to the register and bounds-checked against its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QubitRegister {
    base: u32,
    size: u32,
}

impl QubitRegister {
    pub(crate) fn new(base: u32, size: u32) -> Self {
        Self { base, size }
    }

    /// Number of qubits in the register.
    pub fn len(&self) -> u32 {
        self.size
    }

    /// Registers are never empty once allocated.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Global id of the register's first qubit.
    pub fn base(&self) -> QubitId {
        QubitId(self.base)
    }

    /// The qubit at `index`.
    pub fn qubit(&self, index: u32) -> IrResult<QubitId> {
        if index >= self.size {
            return Err(qubit_out_of_range(index, self.size));
        }
        Ok(QubitId(self.base + index))
    }

    /// Qubits `first..=last`.
    pub fn slice(&self, first: u32, last: u32) -> IrResult<Vec<QubitId>> {
        check_slice(first, last, self.size, qubit_out_of_range)?;
        Ok((first..=last).map(|i| QubitId(self.base + i)).collect())
    }

    /// Qubits at the given indices, in the order given.
    pub fn select(&self, indices: &[u32]) -> IrResult<Vec<QubitId>> {
        indices.iter().map(|&i| self.qubit(i)).collect()
    }

    /// Every qubit of the register.
    pub fn all(&self) -> Vec<QubitId> {
        self.iter().collect()
    }

    /// Iterate over the register's qubits.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + use<> {
        let base = self.base;
        (0..self.size).map(move |i| QubitId(base + i))
    }
}

/// A block of classical bits holding measured values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClbitRegister {
    base: u32,
    values: Vec<u8>,
}

impl ClbitRegister {
    pub(crate) fn new(base: u32, size: u32) -> Self {
        Self {
            base,
            values: vec![0; size as usize],
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn size(&self) -> u32 {
        self.values.len() as u32
    }

    /// Number of bits in the register.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Registers are never empty once allocated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Global id of the bit at `index`.
    pub fn clbit(&self, index: u32) -> IrResult<ClbitId> {
        if index >= self.size() {
            return Err(clbit_out_of_range(index, self.size()));
        }
        Ok(ClbitId(self.base + index))
    }

    /// Stored values.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Value of the bit at `index`.
    pub fn value(&self, index: u32) -> IrResult<u8> {
        self.values
            .get(index as usize)
            .copied()
            .ok_or_else(|| clbit_out_of_range(index, self.size()))
    }

    /// Overwrite the whole register.
    pub fn store(&mut self, values: &[u8]) -> IrResult<()> {
        check_count(self.values.len(), values)?;
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Overwrite bits `first..=last`.
    pub fn store_slice(&mut self, first: u32, last: u32, values: &[u8]) -> IrResult<()> {
        check_slice(first, last, self.size(), clbit_out_of_range)?;
        let range = first as usize..=last as usize;
        check_count(range.clone().count(), values)?;
        self.values[range].copy_from_slice(values);
        Ok(())
    }

    /// Overwrite the bits at `indices`, pairing them with `values` in order.
    pub fn store_select(&mut self, indices: &[u32], values: &[u8]) -> IrResult<()> {
        check_count(indices.len(), values)?;
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.size()) {
            return Err(clbit_out_of_range(bad, self.size()));
        }
        for (&i, &v) in indices.iter().zip(values) {
            self.values[i as usize] = v;
        }
        Ok(())
    }
}

fn check_count(expected: usize, values: &[u8]) -> IrResult<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(IrError::ValueCountMismatch {
            expected,
            got: values.len(),
        })
    }
}

/// One positional argument of an expression application.
///
/// A bare qubit, or a run of qubits taken from a slice, an index set or a
/// whole register. Operands are flattened in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A single qubit.
    Single(QubitId),
    /// Several qubits, consumed left to right.
    Many(Vec<QubitId>),
}

impl Operand {
    fn extend_into(self, out: &mut Vec<QubitId>) {
        match self {
            Operand::Single(q) => out.push(q),
            Operand::Many(qs) => out.extend(qs),
        }
    }
}

impl From<QubitId> for Operand {
    fn from(q: QubitId) -> Self {
        Operand::Single(q)
    }
}

impl From<Vec<QubitId>> for Operand {
    fn from(qs: Vec<QubitId>) -> Self {
        Operand::Many(qs)
    }
}

impl From<&[QubitId]> for Operand {
    fn from(qs: &[QubitId]) -> Self {
        Operand::Many(qs.to_vec())
    }
}

impl From<&QubitRegister> for Operand {
    fn from(reg: &QubitRegister) -> Self {
        Operand::Many(reg.all())
    }
}

impl From<QubitRegister> for Operand {
    fn from(reg: QubitRegister) -> Self {
        Operand::from(&reg)
    }
}

/// Flatten operands into the positional argument list.
pub fn flatten<I>(operands: I) -> Vec<QubitId>
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    let mut out = Vec::new();
    for operand in operands {
        operand.into().extend_into(&mut out);
    }
    out
}

/// Build a `Vec<Operand>` from heterogeneous arguments.
///
/// ```rust
/// use qgate_ir::{operands, QubitId};
///
/// let args = operands![QubitId(0), vec![QubitId(1), QubitId(2)]];
/// assert_eq!(qgate_ir::qubit::flatten(args).len(), 3);
/// ```
#[macro_export]
macro_rules! operands {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::qubit::Operand::from($arg)),*]
    };
}
