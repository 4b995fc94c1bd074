//! Elementary gate set.
//!
//! Every gate is either a single-qubit unitary (stored as a row-major 2x2
//! matrix) or a two-qubit swap. Controls are not part of the gate itself;
//! they are attached by the circuit instruction that carries it.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::FRAC_PI_4;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::errors::{CircuitError, Result};

/// A single-qubit 2x2 matrix stored as [row0col0, row0col1, row1col0, row1col1].
pub type Matrix2x2 = [Complex<f64>; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    /// Phase gate diag(1, e^{iλ}).
    Phase(f64),
    Swap,
}

impl Gate {
    pub fn num_targets(&self) -> usize {
        match self {
            Gate::Swap => 2,
            _ => 1,
        }
    }

    /// Fails unless `got` matches the number of target qubits this gate acts on.
    pub fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.num_targets() {
            return Err(CircuitError::WrongArity {
                gate: self.name(),
                expected: self.num_targets(),
                got,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::Phase(_) => "p",
            Gate::Swap => "swap",
        }
    }

    pub fn inverse(&self) -> Gate {
        match *self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            Gate::Phase(lambda) => Gate::Phase(-lambda),
            g => g,
        }
    }

    /// True for gates that only multiply the |1⟩ amplitude by a phase.
    pub fn is_diagonal(&self) -> bool {
        self.diagonal_phase().is_some()
    }

    /// Phase applied to |1⟩ by a diagonal gate.
    pub fn diagonal_phase(&self) -> Option<Complex<f64>> {
        match *self {
            Gate::Z => Some(-Complex::one()),
            Gate::S => Some(Complex::i()),
            Gate::Sdg => Some(-Complex::i()),
            Gate::T => Some(Complex::from_polar(1.0, FRAC_PI_4)),
            Gate::Tdg => Some(Complex::from_polar(1.0, -FRAC_PI_4)),
            Gate::Phase(lambda) => Some(Complex::from_polar(1.0, lambda)),
            _ => None,
        }
    }

    /// The 2x2 unitary of a single-qubit gate, `None` for swap.
    pub fn matrix(&self) -> Option<Matrix2x2> {
        let zero = Complex::zero();
        let one = Complex::one();
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        match *self {
            Gate::H => Some([h, h, h, -h]),
            Gate::X => Some([zero, one, one, zero]),
            Gate::Y => Some([zero, -Complex::i(), Complex::i(), zero]),
            Gate::Swap => None,
            g => g.diagonal_phase().map(|phase| [one, zero, zero, phase]),
        }
    }
}
