//! Phase estimation over the walk operator.
//!
//! The theta register (qubits 0–3) estimates the eigenphase of one walk step
//! acting on node + coin (qubits 4–9). Every component with a non-zero phase
//! estimate is reflected via the auxiliary qubit 10, and the estimation is
//! then run backwards. Overall this reflects about the step operator's
//! phase-zero eigenspace, which is the diffusion half of the search.

use qwalk_circuit::circuit::Circuit;
use qwalk_circuit::errors::Result;
use qwalk_circuit::library::qft;

use crate::oracle::mark_auxiliary;

pub const THETA_QUBITS: [usize; 4] = [0, 1, 2, 3];
/// Node then coin qubits of the full register.
pub const WALK_QUBITS: [usize; 6] = [4, 5, 6, 7, 8, 9];
pub const AUX_QUBIT: usize = 10;
pub const TOTAL_QUBITS: usize = 11;

/// Qubit map for a controlled step: control first, then node + coin.
fn controlled_map(control: usize) -> [usize; 7] {
    let [n0, n1, n2, n3, c0, c1] = WALK_QUBITS;
    [control, n0, n1, n2, n3, c0, c1]
}

/// Eleven-qubit phase estimation circuit built around `step`.
pub fn phase_estimation(step: &Circuit) -> Result<Circuit> {
    let controlled_step = step.control()?;
    let controlled_inverse_step = step.inverse()?.control()?;
    let inverse_qft = qft(THETA_QUBITS.len(), true)?;
    let forward_qft = qft(THETA_QUBITS.len(), false)?;
    let mark = mark_auxiliary()?;

    let mut circuit = Circuit::new(TOTAL_QUBITS).named(" phase estimation ");
    circuit.h_each(&THETA_QUBITS)?;
    for (i, &control) in THETA_QUBITS.iter().enumerate() {
        for _ in 0..1usize << i {
            circuit.append(&controlled_step, &controlled_map(control))?;
        }
    }

    circuit.append(&inverse_qft, &THETA_QUBITS)?;

    let [t0, t1, t2, t3] = THETA_QUBITS;
    circuit.append(&mark, &[t0, t1, t2, t3, AUX_QUBIT])?;

    circuit.append(&forward_qft, &THETA_QUBITS)?;
    for (i, &control) in THETA_QUBITS.iter().enumerate().rev() {
        for _ in 0..1usize << i {
            circuit.append(&controlled_inverse_step, &controlled_map(control))?;
        }
    }

    let barrier: Vec<usize> = (0..AUX_QUBIT).collect();
    circuit.barrier(&barrier)?;
    circuit.h_each(&THETA_QUBITS)?;
    Ok(circuit)
}
