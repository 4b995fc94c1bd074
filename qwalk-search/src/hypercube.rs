//! Walk operators on the 4-dimensional hypercube.
//!
//! A step acts on 6 qubits: the node register (qubits 0–3) labels one of the
//! 16 hypercube vertices and the coin register (qubits 4–5) picks one of the
//! 4 incident edges. The coin is the Grover diffusion 2|s⟩⟨s| − I; the shift
//! moves the walker across the edge selected by the coin, which flips node
//! bit `q4 + 2·q5`.

use qwalk_circuit::circuit::Circuit;
use qwalk_circuit::errors::Result;

/// Hypercube dimension, also the node register width.
pub const DIMENSION: usize = 4;
pub const NODE_QUBITS: [usize; 4] = [0, 1, 2, 3];
pub const COIN_QUBITS: [usize; 2] = [4, 5];
/// Width of the one-step circuit (node + coin).
pub const STEP_QUBITS: usize = 6;

/// Grover coin on qubits 4 and 5: H·(Z⊗Z·CZ)·H.
pub fn coin_operator(circuit: &mut Circuit) -> Result<()> {
    circuit.h_each(&COIN_QUBITS)?;
    circuit.z_each(&COIN_QUBITS)?;
    circuit.cz(COIN_QUBITS[0], COIN_QUBITS[1])?;
    circuit.h_each(&COIN_QUBITS)?;
    Ok(())
}

/// Conditional bit flips that move the node along the coin's edge.
///
/// Each round re-encodes the coin with X gates so that the Toffoli onto node
/// bit `i` fires exactly for coin value `i`; after four rounds the coin is
/// back to its original value.
pub fn shift_operator(circuit: &mut Circuit) -> Result<()> {
    let [c0, c1] = COIN_QUBITS;
    for i in 0..DIMENSION {
        circuit.x(c0)?;
        if i % 2 == 0 {
            circuit.x(c1)?;
        }
        circuit.ccx(c0, c1, NODE_QUBITS[i])?;
    }
    Ok(())
}

/// One walk step: coin followed by shift.
pub fn one_step() -> Result<Circuit> {
    let mut circuit = Circuit::new(STEP_QUBITS).named(" ONE STEP");
    coin_operator(&mut circuit)?;
    shift_operator(&mut circuit)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwalk_circuit::state::StateVector;
    use qwalk_circuit::Complex;

    fn evolve(circuit: &Circuit, input: usize) -> StateVector {
        let mut s = StateVector::basis(circuit.num_qubits(), input).unwrap();
        for inst in circuit.instructions() {
            s.apply(inst).unwrap();
        }
        s
    }

    #[test]
    fn test_shift_flips_node_bit_selected_by_coin() {
        let mut shift = Circuit::new(STEP_QUBITS);
        shift_operator(&mut shift).unwrap();
        for coin in 0..4usize {
            for node in 0..16usize {
                let input = (coin << 4) | node;
                let s = evolve(&shift, input);
                let expected = (coin << 4) | (node ^ (1 << coin));
                assert_eq!(
                    s.amplitude(expected),
                    Complex::new(1.0, 0.0),
                    "coin {:02b} node {:04b}",
                    coin,
                    node
                );
            }
        }
    }

    #[test]
    fn test_coin_is_grover_diffusion() {
        let mut coin = Circuit::new(STEP_QUBITS);
        coin_operator(&mut coin).unwrap();
        // (2|s⟩⟨s| - I)|00⟩ = -1/2 |00⟩ + 1/2 (|01⟩ + |10⟩ + |11⟩)
        let s = evolve(&coin, 0);
        let expected = [-0.5, 0.5, 0.5, 0.5];
        for (c, &e) in expected.iter().enumerate() {
            let amp = s.amplitude(c << 4);
            assert!((amp - Complex::new(e, 0.0)).norm() < 1e-12, "coin {} amplitude {}", c, amp);
        }
    }

    #[test]
    fn test_coin_leaves_node_untouched() {
        let mut coin = Circuit::new(STEP_QUBITS);
        coin_operator(&mut coin).unwrap();
        let s = evolve(&coin, 0b00_1011);
        let node_dist = s.marginal_probabilities(&NODE_QUBITS);
        assert!((node_dist[0b1011] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_step_moves_to_neighbours() {
        let step = one_step().unwrap();
        assert_eq!(step.num_qubits(), STEP_QUBITS);
        // from node 0000 with coin 00, one step spreads over the four neighbours
        let s = evolve(&step, 0);
        let node_dist = s.marginal_probabilities(&NODE_QUBITS);
        let neighbours: f64 = [0b0001, 0b0010, 0b0100, 0b1000].iter().map(|&n| node_dist[n]).sum();
        assert!((neighbours - 1.0).abs() < 1e-12);
        assert!((node_dist[0b0001] - 0.25).abs() < 1e-12);
    }
}
