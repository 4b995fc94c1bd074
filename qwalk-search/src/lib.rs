//! # qwalk-search
//!
//! Coined quantum walk search on the 4-dimensional hypercube, plus a driver
//! that sweeps every initial register and marked node and records the
//! measured node histograms.
//!
//! ## Algorithm
//!
//! - **Walk step**: Grover coin on a 2-qubit coin register, then a shift that
//!   flips the node bit selected by the coin (one hypercube edge).
//! - **Oracle**: phase flip on the marked node.
//! - **Reflection**: phase estimation of the walk step on a 4-qubit theta
//!   register, a phase flip on every non-zero estimate via an auxiliary
//!   qubit, then the estimation undone.
//!
//! Starting from the uniform superposition, two oracle + reflection rounds
//! put ~89% of the probability on the marked node.
//!
//! ## Usage
//!
//! ```no_run
//! use qwalk_search::prelude::*;
//! use rand::SeedableRng;
//!
//! let search = QuantumWalkSearch::new(SearchConfig::default())?;
//! let params = WalkParams::parse("0", "00", "0000", "0000", "1011")?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let counts = search.run(&params, &mut rng)?;
//! println!("{}", HistogramRow::from_counts(params, &counts, 1024));
//! # Ok::<(), WalkError>(())
//! ```

pub mod errors;
pub mod hypercube;
pub mod oracle;
pub mod params;
pub mod phase_estimation;
pub mod record;
pub mod search;
pub mod sweep;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::errors::WalkError;
    pub use crate::hypercube::*;
    pub use crate::oracle::*;
    pub use crate::params::*;
    pub use crate::phase_estimation::*;
    pub use crate::record::*;
    pub use crate::search::*;
    pub use crate::sweep::*;
}
