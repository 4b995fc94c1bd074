use thiserror::Error;

/// Errors raised while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    #[error("clbit {clbit} out of range for a circuit with {num_clbits} classical bits")]
    ClbitOutOfRange { clbit: usize, num_clbits: usize },
    #[error("gate {gate} acts on {expected} target qubit(s), got {got}")]
    WrongArity {
        gate: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("qubit {0} used more than once in a single gate")]
    DuplicateQubit(usize),
    #[error("qubit map has {got} entries, sub-circuit '{name}' needs {expected}")]
    WidthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid initialization label '{label}' for {num_qubits} qubits")]
    InvalidLabel { label: String, num_qubits: usize },
    #[error("basis index {index} out of range for {num_qubits} qubits")]
    BasisOutOfRange { index: usize, num_qubits: usize },
    #[error("cannot {operation} circuit '{name}': it contains a non-unitary instruction")]
    NotUnitary {
        operation: &'static str,
        name: String,
    },
    #[error("qubit {0} is acted on after it was measured")]
    GateAfterMeasure(usize),
    #[error("circuit '{0}' has no measurements, so there are no counts")]
    NoMeasurements(String),
    #[error("shot count must be positive")]
    ZeroShots,
    #[error("outcome distribution is degenerate: {0}")]
    Sampling(String),
}

pub type Result<T> = std::result::Result<T, CircuitError>;
