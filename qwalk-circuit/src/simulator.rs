//! Shot-based simulation of measured circuits.
//!
//! The simulator evolves the full state vector through every unitary
//! instruction, then samples the classical register from the exact outcome
//! distribution. Measurements therefore have to be terminal: a qubit may not
//! be touched again once it has been measured.

use log::trace;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::circuit::{Circuit, Instruction};
use crate::counts::Counts;
use crate::errors::{CircuitError, Result};
use crate::state::StateVector;

/// Ideal (noise-free) sampling simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct QasmSimulator;

/// Final state plus the (qubit, clbit) pairs that were measured.
struct Evolved {
    state: StateVector,
    measurements: Vec<(usize, usize)>,
}

impl QasmSimulator {
    pub fn new() -> Self {
        QasmSimulator
    }

    fn evolve(&self, circuit: &Circuit) -> Result<Evolved> {
        let mut state = StateVector::new(circuit.num_qubits());
        let mut measurements: Vec<(usize, usize)> = Vec::new();
        let mut measured = vec![false; circuit.num_qubits()];

        for instruction in circuit.instructions() {
            match instruction {
                Instruction::Measure { qubit, clbit } => {
                    measured[*qubit] = true;
                    measurements.retain(|&(_, c)| c != *clbit);
                    measurements.push((*qubit, *clbit));
                }
                Instruction::Gate {
                    targets, controls, ..
                } => {
                    if let Some(&q) = targets
                        .iter()
                        .chain(controls.iter())
                        .find(|&&q| measured[q])
                    {
                        return Err(CircuitError::GateAfterMeasure(q));
                    }
                    state.apply(instruction)?;
                }
                Instruction::Initialize { .. } => {
                    if let Some(q) = measured.iter().position(|&m| m) {
                        return Err(CircuitError::GateAfterMeasure(q));
                    }
                    state.apply(instruction)?;
                }
                Instruction::Barrier { .. } => {}
            }
        }

        Ok(Evolved {
            state,
            measurements,
        })
    }

    /// Final state vector of `circuit`, ignoring its measurements.
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector> {
        self.evolve(circuit).map(|e| e.state)
    }

    /// Exact distribution over the classical register.
    pub fn outcome_probabilities(&self, circuit: &Circuit) -> Result<Vec<f64>> {
        let evolved = self.evolve(circuit)?;
        if evolved.measurements.is_empty() {
            return Err(CircuitError::NoMeasurements(circuit.name().to_string()));
        }
        Ok(Self::register_distribution(
            &evolved.state,
            &evolved.measurements,
            circuit.num_clbits(),
        ))
    }

    fn register_distribution(
        state: &StateVector,
        measurements: &[(usize, usize)],
        num_clbits: usize,
    ) -> Vec<f64> {
        let mut probs = vec![0.0; 1usize << num_clbits];
        for (i, amp) in state.amplitudes().iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let key = measurements
                .iter()
                .fold(0usize, |acc, &(q, c)| acc | (((i >> q) & 1) << c));
            probs[key] += p;
        }
        probs
    }

    /// Run `circuit` for `shots` shots and histogram the classical register.
    pub fn run<R: Rng + ?Sized>(&self, circuit: &Circuit, shots: usize, rng: &mut R) -> Result<Counts> {
        if shots == 0 {
            return Err(CircuitError::ZeroShots);
        }
        let probs = self.outcome_probabilities(circuit)?;
        let dist = WeightedIndex::new(&probs).map_err(|e| CircuitError::Sampling(e.to_string()))?;

        let mut counts = Counts::new(circuit.num_clbits());
        for _ in 0..shots {
            counts.record(dist.sample(rng) as u64);
        }
        trace!(
            "ran '{}' ({} gates) for {} shots: {}",
            circuit.name(),
            circuit.gate_count(),
            shots,
            counts
        );
        Ok(counts)
    }
}
