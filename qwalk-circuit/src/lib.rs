//! # qwalk-circuit
//!
//! Small gate-level quantum circuit toolkit: a builder for circuits over
//! named sub-circuits, a dense state-vector backend and a shot sampler.
//!
//! It covers what a walk-search experiment needs from a quantum SDK:
//! basis-state initialisation, Clifford+phase gates with any number of
//! controls, composition of sub-circuits through qubit maps, whole-circuit
//! inversion and control, the QFT, and terminal measurement into a
//! classical register.
//!
//! ## Usage
//!
//! ```
//! use qwalk_circuit::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut bell = Circuit::with_clbits(2, 2);
//! bell.h(0)?.cx(0, 1)?;
//! bell.measure(0, 0)?.measure(1, 1)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let counts = QasmSimulator::new().run(&bell, 1024, &mut rng)?;
//! assert_eq!(counts.count(0b01) + counts.count(0b10), 0);
//! # Ok::<(), CircuitError>(())
//! ```

pub mod circuit;
pub mod counts;
pub mod errors;
pub mod gates;
pub mod library;
pub mod simulator;
pub mod state;

pub use num_complex::Complex;

pub mod prelude {
    pub use crate::circuit::*;
    pub use crate::counts::*;
    pub use crate::errors::CircuitError;
    pub use crate::gates::*;
    pub use crate::library::*;
    pub use crate::simulator::*;
    pub use crate::state::*;
}
