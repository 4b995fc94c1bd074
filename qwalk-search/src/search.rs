//! The full coined quantum walk search circuit.
//!
//! Register layout (11 qubits, 4 classical bits):
//!
//! ```text
//! qubit   0-3    4-7    8-9    10
//!         theta  node   coin   auxiliary
//! ```
//!
//! After initialisation the node and coin registers are put in uniform
//! superposition; each iteration then applies the phase oracle for the
//! marked node followed by the phase-estimation reflection. The node register
//! is measured into clbits 0–3.

use log::debug;
use rand::Rng;

use qwalk_circuit::circuit::Circuit;
use qwalk_circuit::counts::Counts;
use qwalk_circuit::simulator::QasmSimulator;
use qwalk_circuit::state::StateVector;

use crate::errors::Result;
use crate::hypercube::{one_step, NODE_QUBITS};
use crate::oracle::phase_oracle;
use crate::params::WalkParams;
use crate::phase_estimation::{phase_estimation, TOTAL_QUBITS, WALK_QUBITS};

/// Qubits of the node register in the full circuit.
pub const NODE_REGISTER: [usize; 4] = [4, 5, 6, 7];

/// Search parameters that do not vary across the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Oracle + reflection rounds.
    pub iterations: usize,
    /// Samples drawn per circuit.
    pub shots: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 2,
            shots: 1024,
        }
    }
}

/// Builds and runs the walk-search circuit for any parameter combination.
///
/// The phase-estimation block does not depend on the parameters, so it is
/// built once and reused by every circuit.
#[derive(Debug, Clone)]
pub struct QuantumWalkSearch {
    config: SearchConfig,
    phase_estimation: Circuit,
    simulator: QasmSimulator,
}

impl QuantumWalkSearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let step = one_step()?;
        let phase_estimation = phase_estimation(&step)?;
        debug!(
            "walk search ready: {} iterations, {} shots, {} gates per reflection",
            config.iterations,
            config.shots,
            phase_estimation.gate_count()
        );
        Ok(QuantumWalkSearch {
            config,
            phase_estimation,
            simulator: QasmSimulator::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Measured circuit for one combination.
    pub fn circuit(&self, params: &WalkParams) -> Result<Circuit> {
        let mut circuit = self.unmeasured_circuit(params)?;
        for (clbit, &qubit) in NODE_REGISTER.iter().enumerate() {
            circuit.measure(qubit, clbit)?;
        }
        Ok(circuit)
    }

    fn unmeasured_circuit(&self, params: &WalkParams) -> Result<Circuit> {
        let oracle = phase_oracle(params.target)?;
        let all: Vec<usize> = (0..TOTAL_QUBITS).collect();

        let mut circuit = Circuit::with_clbits(TOTAL_QUBITS, NODE_QUBITS.len()).named("qwalk");
        circuit.initialize(&params.init_label())?;
        circuit.h_each(&WALK_QUBITS)?;
        for _ in 0..self.config.iterations {
            circuit.append(&oracle, &WALK_QUBITS)?;
            circuit.append(&self.phase_estimation, &all)?;
        }
        Ok(circuit)
    }

    /// Simulate one combination and histogram the node register.
    pub fn run<R: Rng + ?Sized>(&self, params: &WalkParams, rng: &mut R) -> Result<Counts> {
        let circuit = self.circuit(params)?;
        let counts = self.simulator.run(&circuit, self.config.shots, rng)?;
        Ok(counts)
    }

    /// Final state before measurement.
    pub fn final_state(&self, params: &WalkParams) -> Result<StateVector> {
        let circuit = self.unmeasured_circuit(params)?;
        Ok(self.simulator.statevector(&circuit)?)
    }

    /// Exact distribution of the node register.
    pub fn node_distribution(&self, params: &WalkParams) -> Result<Vec<f64>> {
        Ok(self.final_state(params)?.marginal_probabilities(&NODE_REGISTER))
    }

    /// Exact probability of measuring the marked node.
    pub fn success_probability(&self, params: &WalkParams) -> Result<f64> {
        let dist = self.node_distribution(params)?;
        Ok(dist[params.target.value() as usize])
    }
}
