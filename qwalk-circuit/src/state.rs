//! Dense state vector over `n` qubits.
//!
//! Amplitude `i` belongs to the basis state whose bit `q` is the value of
//! qubit `q`. Gates are applied in place; controls are folded into a bit mask
//! so a multi-controlled gate costs the same single pass as an uncontrolled one.

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::circuit::Instruction;
use crate::errors::{CircuitError, Result};
use crate::gates::Gate;

#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// |0…0⟩ on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::one();
        StateVector {
            num_qubits,
            amplitudes,
        }
    }

    /// The computational basis state `index`.
    pub fn basis(num_qubits: usize, index: usize) -> Result<Self> {
        let dim = 1usize << num_qubits;
        if index >= dim {
            return Err(CircuitError::BasisOutOfRange { index, num_qubits });
        }
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[index] = Complex::one();
        Ok(StateVector {
            num_qubits,
            amplitudes,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub fn amplitude(&self, index: usize) -> Complex<f64> {
        self.amplitudes[index]
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Distribution of the listed qubits read as an integer.
    ///
    /// `qubits[k]` supplies bit `k` of the outcome.
    pub fn marginal_probabilities(&self, qubits: &[usize]) -> Vec<f64> {
        let mut out = vec![0.0; 1usize << qubits.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let key = qubits
                .iter()
                .enumerate()
                .fold(0usize, |acc, (k, &q)| acc | (((i >> q) & 1) << k));
            out[key] += p;
        }
        out
    }

    /// |⟨self|other⟩|².
    pub fn fidelity(&self, other: &StateVector) -> f64 {
        let overlap: Complex<f64> = self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum();
        overlap.norm_sqr()
    }

    pub fn reset_to_basis(&mut self, index: usize) -> Result<()> {
        if index >= self.dim() {
            return Err(CircuitError::BasisOutOfRange {
                index,
                num_qubits: self.num_qubits,
            });
        }
        self.amplitudes.iter_mut().for_each(|a| *a = Complex::zero());
        self.amplitudes[index] = Complex::one();
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(CircuitError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Apply `gate` to `targets`, conditioned on every qubit in `controls` being 1.
    pub fn apply_gate(&mut self, gate: Gate, targets: &[usize], controls: &[usize]) -> Result<()> {
        gate.check_arity(targets.len())?;
        let mut control_mask = 0usize;
        for &c in controls {
            self.check_qubit(c)?;
            control_mask |= 1 << c;
        }
        for &t in targets {
            self.check_qubit(t)?;
        }

        match gate {
            Gate::Swap => self.apply_swap(targets[0], targets[1], control_mask),
            Gate::X => self.apply_x(targets[0], control_mask),
            g => match g.diagonal_phase() {
                Some(phase) => self.apply_phase(targets[0], control_mask, phase),
                None => {
                    if let Some(m) = g.matrix() {
                        self.apply_matrix(targets[0], control_mask, m);
                    }
                }
            },
        }
        Ok(())
    }

    fn apply_x(&mut self, target: usize, control_mask: usize) {
        let bit = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & bit == 0 && i & control_mask == control_mask {
                self.amplitudes.swap(i, i | bit);
            }
        }
    }

    fn apply_phase(&mut self, target: usize, control_mask: usize, phase: Complex<f64>) {
        let mask = control_mask | (1usize << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    fn apply_matrix(&mut self, target: usize, control_mask: usize, m: [Complex<f64>; 4]) {
        let bit = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & bit != 0 || i & control_mask != control_mask {
                continue;
            }
            let j = i | bit;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = m[0] * a + m[1] * b;
            self.amplitudes[j] = m[2] * a + m[3] * b;
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize, control_mask: usize) {
        let (abit, bbit) = (1usize << a, 1usize << b);
        for i in 0..self.amplitudes.len() {
            if i & abit != 0 && i & bbit == 0 && i & control_mask == control_mask {
                self.amplitudes.swap(i, i ^ abit ^ bbit);
            }
        }
    }

    /// Apply one unitary instruction. Measurements are left to the simulator.
    pub fn apply(&mut self, instruction: &Instruction) -> Result<()> {
        match instruction {
            Instruction::Gate {
                gate,
                targets,
                controls,
            } => self.apply_gate(*gate, targets, controls),
            Instruction::Initialize { index } => self.reset_to_basis(*index),
            Instruction::Barrier { .. } | Instruction::Measure { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn test_new_is_ground_state() {
        let s = StateVector::new(3);
        assert_eq!(s.dim(), 8);
        assert_eq!(s.amplitude(0), Complex::one());
        assert!((s.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hadamard_creates_equal_superposition() {
        let mut s = StateVector::new(1);
        s.apply_gate(Gate::H, &[0], &[]).unwrap();
        assert!(close(s.amplitude(0), Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!(close(s.amplitude(1), Complex::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_apply_gate_rejects_wrong_target_count() {
        let mut s = StateVector::new(2);
        assert!(matches!(
            s.apply_gate(Gate::X, &[], &[]),
            Err(CircuitError::WrongArity { expected: 1, got: 0, .. })
        ));
        assert!(matches!(
            s.apply_gate(Gate::Swap, &[1], &[]),
            Err(CircuitError::WrongArity { expected: 2, got: 1, .. })
        ));
        assert_eq!(s.amplitude(0), Complex::one());
    }

    #[test]
    fn test_bell_state() {
        let mut s = StateVector::new(2);
        s.apply_gate(Gate::H, &[0], &[]).unwrap();
        s.apply_gate(Gate::X, &[1], &[0]).unwrap();
        let p = s.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[3] - 0.5).abs() < 1e-12);
        assert!(p[1].abs() < 1e-12 && p[2].abs() < 1e-12);
    }

    #[test]
    fn test_toffoli_only_fires_when_all_controls_set() {
        for index in 0..8 {
            let mut s = StateVector::basis(3, index).unwrap();
            s.apply_gate(Gate::X, &[2], &[0, 1]).unwrap();
            let expected = if index & 0b011 == 0b011 { index ^ 0b100 } else { index };
            assert_eq!(s.amplitude(expected), Complex::one(), "input {:03b}", index);
        }
    }

    #[test]
    fn test_controlled_phase_only_on_both_ones() {
        let mut s = StateVector::basis(2, 3).unwrap();
        s.apply_gate(Gate::Phase(PI / 2.0), &[1], &[0]).unwrap();
        assert!(close(s.amplitude(3), Complex::i()));

        let mut s = StateVector::basis(2, 2).unwrap();
        s.apply_gate(Gate::Phase(PI / 2.0), &[1], &[0]).unwrap();
        assert!(close(s.amplitude(2), Complex::one()));
    }

    #[test]
    fn test_swap_exchanges_bits() {
        let mut s = StateVector::basis(3, 0b001).unwrap();
        s.apply_gate(Gate::Swap, &[0, 2], &[]).unwrap();
        assert_eq!(s.amplitude(0b100), Complex::one());
    }

    #[test]
    fn test_marginal_probabilities_respect_qubit_order() {
        // |110⟩ read through qubits [2, 1] gives bits (1, 1) -> 3, through [0, 2] gives (0, 1) -> 2
        let s = StateVector::basis(3, 0b110).unwrap();
        assert_eq!(s.marginal_probabilities(&[2, 1])[3], 1.0);
        assert_eq!(s.marginal_probabilities(&[0, 2])[2], 1.0);
    }

    #[test]
    fn test_fidelity_of_orthogonal_states_is_zero() {
        let a = StateVector::basis(2, 1).unwrap();
        let b = StateVector::basis(2, 2).unwrap();
        assert_eq!(a.fidelity(&b), 0.0);
        assert!((a.fidelity(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gate_on_missing_qubit_is_rejected() {
        let mut s = StateVector::new(2);
        assert!(matches!(
            s.apply_gate(Gate::H, &[5], &[]),
            Err(CircuitError::QubitOutOfRange { qubit: 5, .. })
        ));
    }
}
