//! Demo programs.
//!
//! Every program takes a context, allocates what it needs and returns the
//! classical register holding its measurements.

pub mod controls;
pub mod ghz;

pub use controls::{hadamard_fanout, mixed_controls};
pub use ghz::ghz;

use clap::ValueEnum;
use qgate_ir::{Backend, ClbitRegister, Context, IrResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Programs selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Program {
    /// GHZ state over `n` qubits.
    Ghz,
    /// Mixed positive and negative controls with modifiers on two registers.
    MixedControls,
    /// Controlled Hadamards fanned out from qubit 0.
    HadamardFanout,
}

impl Program {
    /// Run the program on `ctx`. `size` is ignored by fixed-size programs.
    pub fn run<B: Backend>(self, ctx: &mut Context<B>, size: u32) -> IrResult<ClbitRegister> {
        ctx.run(&self.to_string(), |ctx| match self {
            Program::Ghz => ghz(ctx, size),
            Program::MixedControls => mixed_controls(ctx),
            Program::HadamardFanout => hadamard_fanout(ctx, size),
        })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Program::Ghz => "ghz",
            Program::MixedControls => "mixed-controls",
            Program::HadamardFanout => "hadamard-fanout",
        };
        write!(f, "{name}")
    }
}
