//! Phase marking circuits.

use qwalk_circuit::circuit::Circuit;
use qwalk_circuit::errors::Result;

use crate::hypercube::{NODE_QUBITS, STEP_QUBITS};
use crate::params::BitString;

/// Flip the phase of the node register state equal to `target`.
///
/// The target string reads big-endian over qubits 0–3: its leftmost char
/// belongs to qubit 3. Qubits whose target bit is 0 are conjugated with X so
/// that an H-sandwiched multi-controlled X (a CCCZ) hits exactly the target.
pub fn mark_target(circuit: &mut Circuit, target: BitString) -> Result<()> {
    let len = target.width() as usize;
    let zero_qubits: Vec<usize> = (0..len)
        .rev()
        .filter(|&i| !target.char_is_one(i))
        .map(|i| len - 1 - i)
        .collect();

    circuit.x_each(&zero_qubits)?;
    let [q0, q1, q2, q3] = NODE_QUBITS;
    circuit.h(q3)?;
    circuit.mcx(&[q0, q1, q2], q3)?;
    circuit.h(q3)?;
    circuit.x_each(&zero_qubits)?;
    Ok(())
}

/// Six-qubit oracle over node + coin that marks the `target` vertex.
pub fn phase_oracle(target: BitString) -> Result<Circuit> {
    let mut circuit = Circuit::new(STEP_QUBITS).named(" phase oracle ");
    mark_target(&mut circuit, target)?;
    Ok(circuit)
}

/// Five-qubit reflection: −1 on every state whose qubits 0–3 are not all zero.
///
/// Qubit 4 is an auxiliary that must start (and is returned) in |0⟩.
pub fn mark_auxiliary() -> Result<Circuit> {
    let all = [0, 1, 2, 3, 4];
    let controls = [0, 1, 2, 3];
    let mut circuit = Circuit::new(5).named(" mark auxiliary ");
    circuit.x_each(&all)?;
    circuit.mcx(&controls, 4)?;
    circuit.z(4)?;
    circuit.mcx(&controls, 4)?;
    circuit.x_each(&all)?;
    Ok(circuit)
}
