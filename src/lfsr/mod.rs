//! Generates a keystream by combining three linear-feedback shift registers.
//!
//! Each register is a Fibonacci-style LFSR: every clock outputs the bit at the
//! front of the register and appends the parity of its tap cells at the back.
//! [the Wiki](https://en.wikipedia.org/wiki/Linear-feedback_shift_register#Fibonacci_LFSRs)
//! is an excellent reference for further details.
//!
//! Three such registers feed the `Generator`. The decider register controls a
//! clock-controlled combiner over the other two: when the data registers
//! agree, the decider's bit is emitted; when they disagree, the decider picks
//! which one is emitted and the register that lost gets an extra clock.
//!
//! Tap positions are given 1-indexed counting back from the newest cell, so a
//! register of length `L` has its oldest cell at position `L` and its newest
//! at position `1`. This matches the usual way feedback polynomials are
//! written: taps `[20, 1]` on a 20-bit register tie the output cell and the
//! newest cell into the feedback.

use std::fmt;
use thiserror::Error;

pub mod config;
pub mod generator;
pub mod keystream_node;
pub mod shift_register;

pub use self::config::{GeneratorConfig, RegisterConfig};
pub use self::generator::{generate_parallel, Generator, RegisterSnapshot};
pub use self::keystream_node::KeystreamNode;
pub use self::shift_register::ShiftRegister;

/// The job a register performs inside the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterRole {
    Decider,
    First,
    Second,
}

impl RegisterRole {
    /// Index of the register in generator order, as shown by diagnostics.
    pub fn index(self) -> usize {
        match self {
            RegisterRole::Decider => 0,
            RegisterRole::First => 1,
            RegisterRole::Second => 2,
        }
    }
}

impl fmt::Display for RegisterRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            RegisterRole::Decider => "decider",
            RegisterRole::First => "first",
            RegisterRole::Second => "second",
        };
        write!(f, "{}", name)
    }
}

/// Why a single register refused its fill or taps.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("register fill must contain at least one bit")]
    EmptyFill,
    #[error("fill value {value} at index {index} is not a bit")]
    InvalidBit { index: usize, value: u8 },
    #[error("tap position {tap} is outside [1, {len}]")]
    TapOutOfRange { tap: usize, len: usize },
}

/// A generator configuration that was rejected, naming the register at fault.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {role} register configuration")]
pub struct ConfigError {
    pub role: RegisterRole,
    #[source]
    pub source: RegisterError,
}

impl ConfigError {
    pub fn new(role: RegisterRole, source: RegisterError) -> Self {
        ConfigError { role, source }
    }
}
