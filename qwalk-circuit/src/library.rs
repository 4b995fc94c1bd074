//! Standard sub-circuits.

use std::f64::consts::PI;

use crate::circuit::Circuit;
use crate::errors::Result;

/// Quantum Fourier transform on `n` qubits, with the final qubit-reversal swaps.
///
/// On little-endian basis states the forward transform maps
/// |x⟩ → 2^{-n/2} Σ_y e^{2πi·xy/2^n} |y⟩. `inverse` returns the adjoint.
pub fn qft(n: usize, inverse: bool) -> Result<Circuit> {
    let mut c = Circuit::new(n).named("QFT");
    for j in (0..n).rev() {
        c.h(j)?;
        for k in (0..j).rev() {
            c.cp(PI / (1u64 << (j - k)) as f64, j, k)?;
        }
    }
    for i in 0..n / 2 {
        c.swap(i, n - i - 1)?;
    }
    if inverse {
        Ok(c.inverse()?.named("IQFT"))
    } else {
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateVector;
    use num_complex::Complex;

    fn run(circuit: &Circuit, input: usize) -> StateVector {
        let mut s = StateVector::basis(circuit.num_qubits(), input).unwrap();
        for inst in circuit.instructions() {
            s.apply(inst).unwrap();
        }
        s
    }

    #[test]
    fn test_qft_matches_dft() {
        let n = 4;
        let dim = 1 << n;
        let circuit = qft(n, false).unwrap();
        for x in [0usize, 1, 5, 11] {
            let s = run(&circuit, x);
            for y in 0..dim {
                let angle = 2.0 * PI * (x * y) as f64 / dim as f64;
                let expected = Complex::from_polar(1.0 / (dim as f64).sqrt(), angle);
                assert!(
                    (s.amplitude(y) - expected).norm() < 1e-10,
                    "QFT|{}⟩ amplitude at {} was {}",
                    x,
                    y,
                    s.amplitude(y)
                );
            }
        }
    }

    #[test]
    fn test_inverse_qft_undoes_qft() {
        let forward = qft(4, false).unwrap();
        let backward = qft(4, true).unwrap();
        let mut combined = Circuit::new(4);
        combined.append(&forward, &[0, 1, 2, 3]).unwrap();
        combined.append(&backward, &[0, 1, 2, 3]).unwrap();
        for x in 0..16 {
            let s = run(&combined, x);
            assert!((s.amplitude(x).norm() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_qft_gate_count() {
        // n Hadamards, n(n-1)/2 controlled phases, n/2 swaps
        assert_eq!(qft(4, false).unwrap().gate_count(), 4 + 6 + 2);
        assert_eq!(qft(1, true).unwrap().gate_count(), 1);
    }
}
