//! Gate-level circuit description.
//!
//! A [`Circuit`] is a flat list of [`Instruction`]s over `num_qubits` qubits
//! and `num_clbits` classical bits. Sub-circuits are composed by inlining
//! them through a qubit map ([`Circuit::append`]), and whole circuits can be
//! inverted or given an extra control qubit, which is all that is needed to
//! express controlled walk steps and phase estimation.
//!
//! Qubit numbering is little-endian: qubit 0 is the least significant bit of
//! a basis-state index, and in a bit-string label it is the rightmost char.

use smallvec::{smallvec, SmallVec};

use crate::errors::{CircuitError, Result};
use crate::gates::Gate;

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Gate {
        gate: Gate,
        targets: SmallVec<[usize; 2]>,
        controls: SmallVec<[usize; 4]>,
    },
    /// Reset the whole register to the computational basis state `index`.
    Initialize { index: usize },
    Measure { qubit: usize, clbit: usize },
    Barrier { qubits: SmallVec<[usize; 8]> },
}

impl Instruction {
    pub fn is_unitary(&self) -> bool {
        matches!(self, Instruction::Gate { .. } | Instruction::Barrier { .. })
    }

    fn remap(&self, map: &[usize]) -> Instruction {
        match self {
            Instruction::Gate {
                gate,
                targets,
                controls,
            } => Instruction::Gate {
                gate: *gate,
                targets: targets.iter().map(|&q| map[q]).collect(),
                controls: controls.iter().map(|&q| map[q]).collect(),
            },
            Instruction::Barrier { qubits } => Instruction::Barrier {
                qubits: qubits.iter().map(|&q| map[q]).collect(),
            },
            Instruction::Measure { qubit, clbit } => Instruction::Measure {
                qubit: map[*qubit],
                clbit: *clbit,
            },
            Instruction::Initialize { index } => Instruction::Initialize { index: *index },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    name: String,
    num_qubits: usize,
    num_clbits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Self {
        Self::with_clbits(num_qubits, 0)
    }

    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Self {
        Circuit {
            name: String::from("circuit"),
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions, barriers and measurements excluded.
    pub fn gate_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Gate { .. }))
            .count()
    }

    pub fn is_unitary(&self) -> bool {
        self.instructions.iter().all(Instruction::is_unitary)
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

    /// Push a gate after validating its operands.
    pub fn gate(&mut self, gate: Gate, targets: &[usize], controls: &[usize]) -> Result<&mut Self> {
        gate.check_arity(targets.len())?;
        let mut seen: SmallVec<[usize; 8]> = SmallVec::new();
        for &q in targets.iter().chain(controls.iter()) {
            self.check_qubit(q)?;
            if seen.contains(&q) {
                return Err(CircuitError::DuplicateQubit(q));
            }
            seen.push(q);
        }
        self.instructions.push(Instruction::Gate {
            gate,
            targets: SmallVec::from_slice(targets),
            controls: SmallVec::from_slice(controls),
        });
        Ok(self)
    }

    pub fn h(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::H, &[q], &[])
    }

    pub fn x(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::X, &[q], &[])
    }

    pub fn y(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::Y, &[q], &[])
    }

    pub fn z(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::Z, &[q], &[])
    }

    pub fn s(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::S, &[q], &[])
    }

    pub fn sdg(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::Sdg, &[q], &[])
    }

    pub fn t(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::T, &[q], &[])
    }

    pub fn tdg(&mut self, q: usize) -> Result<&mut Self> {
        self.gate(Gate::Tdg, &[q], &[])
    }

    pub fn p(&mut self, lambda: f64, q: usize) -> Result<&mut Self> {
        self.gate(Gate::Phase(lambda), &[q], &[])
    }

    pub fn h_each(&mut self, qubits: &[usize]) -> Result<&mut Self> {
        for &q in qubits {
            self.h(q)?;
        }
        Ok(self)
    }

    pub fn x_each(&mut self, qubits: &[usize]) -> Result<&mut Self> {
        for &q in qubits {
            self.x(q)?;
        }
        Ok(self)
    }

    pub fn z_each(&mut self, qubits: &[usize]) -> Result<&mut Self> {
        for &q in qubits {
            self.z(q)?;
        }
        Ok(self)
    }

    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.gate(Gate::X, &[target], &[control])
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.gate(Gate::Z, &[target], &[control])
    }

    pub fn cp(&mut self, lambda: f64, control: usize, target: usize) -> Result<&mut Self> {
        self.gate(Gate::Phase(lambda), &[target], &[control])
    }

    pub fn ccx(&mut self, c0: usize, c1: usize, target: usize) -> Result<&mut Self> {
        self.gate(Gate::X, &[target], &[c0, c1])
    }

    /// Multi-controlled X (Toffoli generalisation).
    pub fn mcx(&mut self, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.gate(Gate::X, &[target], controls)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.gate(Gate::Swap, &[a, b], &[])
    }

    pub fn barrier(&mut self, qubits: &[usize]) -> Result<&mut Self> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        self.instructions.push(Instruction::Barrier {
            qubits: SmallVec::from_slice(qubits),
        });
        Ok(self)
    }

    pub fn measure(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        self.check_qubit(qubit)?;
        if clbit >= self.num_clbits {
            return Err(CircuitError::ClbitOutOfRange {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        self.instructions.push(Instruction::Measure { qubit, clbit });
        Ok(self)
    }

    /// Prepare a basis state from a `'0'`/`'1'` label, one char per qubit.
    ///
    /// The label reads big-endian: its last char is qubit 0.
    pub fn initialize(&mut self, label: &str) -> Result<&mut Self> {
        let invalid = || CircuitError::InvalidLabel {
            label: label.to_string(),
            num_qubits: self.num_qubits,
        };
        if label.len() != self.num_qubits {
            return Err(invalid());
        }
        let mut index = 0usize;
        for c in label.chars() {
            index <<= 1;
            match c {
                '0' => {}
                '1' => index |= 1,
                _ => return Err(invalid()),
            }
        }
        self.initialize_index(index)
    }

    pub fn initialize_index(&mut self, index: usize) -> Result<&mut Self> {
        if self.num_qubits >= usize::BITS as usize || index >> self.num_qubits != 0 {
            return Err(CircuitError::BasisOutOfRange {
                index,
                num_qubits: self.num_qubits,
            });
        }
        self.instructions.push(Instruction::Initialize { index });
        Ok(self)
    }

    /// Inline `other` onto the qubits listed in `qubits`.
    ///
    /// Qubit `i` of `other` lands on `qubits[i]`. Only unitary sub-circuits
    /// can be appended.
    pub fn append(&mut self, other: &Circuit, qubits: &[usize]) -> Result<&mut Self> {
        if qubits.len() != other.num_qubits {
            return Err(CircuitError::WidthMismatch {
                name: other.name.clone(),
                expected: other.num_qubits,
                got: qubits.len(),
            });
        }
        if !other.is_unitary() {
            return Err(CircuitError::NotUnitary {
                operation: "append",
                name: other.name.clone(),
            });
        }
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q)?;
            if qubits[..i].contains(&q) {
                return Err(CircuitError::DuplicateQubit(q));
            }
        }
        self.instructions
            .extend(other.instructions.iter().map(|inst| inst.remap(qubits)));
        Ok(self)
    }

    /// The adjoint circuit: instructions reversed, every gate inverted.
    pub fn inverse(&self) -> Result<Circuit> {
        if !self.is_unitary() {
            return Err(CircuitError::NotUnitary {
                operation: "invert",
                name: self.name.clone(),
            });
        }
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(|inst| match inst {
                Instruction::Gate {
                    gate,
                    targets,
                    controls,
                } => Instruction::Gate {
                    gate: gate.inverse(),
                    targets: targets.clone(),
                    controls: controls.clone(),
                },
                other => other.clone(),
            })
            .collect();
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            num_clbits: 0,
            instructions,
        })
    }

    /// Controlled version of this circuit.
    ///
    /// The result is one qubit wider: qubit 0 is the control and original
    /// qubit `q` becomes `q + 1`. Every gate picks up the extra control, so
    /// the circuit acts as |0⟩⟨0|⊗I + |1⟩⟨1|⊗U.
    pub fn control(&self) -> Result<Circuit> {
        if !self.is_unitary() {
            return Err(CircuitError::NotUnitary {
                operation: "control",
                name: self.name.clone(),
            });
        }
        let shift: Vec<usize> = (1..=self.num_qubits).collect();
        let instructions = self
            .instructions
            .iter()
            .map(|inst| match inst.remap(&shift) {
                Instruction::Gate {
                    gate,
                    targets,
                    controls,
                } => {
                    let mut with_control: SmallVec<[usize; 4]> = smallvec![0];
                    with_control.extend(controls);
                    Instruction::Gate {
                        gate,
                        targets,
                        controls: with_control,
                    }
                }
                other => other,
            })
            .collect();
        Ok(Circuit {
            name: format!("c_{}", self.name),
            num_qubits: self.num_qubits + 1,
            num_clbits: 0,
            instructions,
        })
    }
}
