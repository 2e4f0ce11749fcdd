use super::evaluator::{Evaluator, Resolution};
use crate::core::circuit::Circuit;
use crate::core::components::registry::ComponentRegistry;
use crate::core::components::types::ComponentKind;
use crate::core::errors::{CircuitError, Result};
use crate::core::types::{Bit, ComponentId};
use std::fmt;

/// Largest number of INPUT components a circuit truth table will enumerate
pub const MAX_TABLE_INPUTS: usize = 16;

const OPERAND_LABELS: [&str; 2] = ["A", "B"];

/// One row: an input assignment and what each output resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct TruthTableRow {
    pub inputs: Vec<Bit>,
    pub outputs: Vec<Resolution>,
}

/// Truth table of a single gate or of a whole circuit.
///
/// Rows are in ascending binary order with the first input as the most
/// significant bit.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthTable {
    pub input_labels: Vec<String>,
    pub output_labels: Vec<String>,
    pub rows: Vec<TruthTableRow>,
}

impl TruthTable {
    /// Canonical table of one gate kind; `None` for INPUT and OUTPUT
    pub fn for_kind(kind: ComponentKind) -> Option<TruthTable> {
        if !kind.is_gate() {
            return None;
        }
        let arity = ComponentRegistry::arity(kind);
        let rows = assignments(arity)
            .map(|inputs| {
                let outputs = ComponentRegistry::apply(kind, &inputs)
                    .map(Resolution::Value)
                    .into_iter()
                    .collect();
                TruthTableRow { inputs, outputs }
            })
            .collect();

        Some(TruthTable {
            input_labels: OPERAND_LABELS[..arity].iter().map(|s| s.to_string()).collect(),
            output_labels: vec![kind.name().to_string()],
            rows,
        })
    }

    /// Enumerate every assignment of the circuit's INPUT components.
    ///
    /// Inputs and outputs are taken in circuit order. The circuit itself
    /// is left untouched; each row is evaluated on a scratch copy.
    pub fn for_circuit(circuit: &Circuit) -> Result<TruthTable> {
        let inputs: Vec<ComponentId> = circuit
            .components_of_kind(ComponentKind::Input)
            .map(|c| c.id().clone())
            .collect();
        if inputs.len() > MAX_TABLE_INPUTS {
            return Err(CircuitError::TooManyInputs {
                count: inputs.len(),
                limit: MAX_TABLE_INPUTS,
            });
        }
        let outputs: Vec<ComponentId> = circuit
            .components_of_kind(ComponentKind::Output)
            .map(|c| c.id().clone())
            .collect();

        let mut scratch = circuit.clone();
        let mut rows = Vec::with_capacity(1 << inputs.len());
        for assignment in assignments(inputs.len()) {
            for (id, bit) in inputs.iter().zip(&assignment) {
                scratch.set_input_value(id, *bit)?;
            }
            let mut evaluator = Evaluator::new(&scratch);
            let resolved = outputs.iter().map(|id| evaluator.resolve(id)).collect();
            rows.push(TruthTableRow {
                inputs: assignment,
                outputs: resolved,
            });
        }

        Ok(TruthTable {
            input_labels: inputs.iter().map(|id| id.to_string()).collect(),
            output_labels: outputs.iter().map(|id| id.to_string()).collect(),
            rows,
        })
    }

    /// Row matching an input assignment
    pub fn lookup(&self, inputs: &[Bit]) -> Option<&TruthTableRow> {
        self.rows.iter().find(|row| row.inputs == inputs)
    }
}

/// All `width`-bit assignments in ascending order, most significant first
fn assignments(width: usize) -> impl Iterator<Item = Vec<Bit>> {
    (0..1u32 << width).map(move |n| {
        (0..width)
            .rev()
            .map(|bit| Bit::from_bool(n & (1 << bit) != 0))
            .collect()
    })
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} | {}",
            self.input_labels.join(" "),
            self.output_labels.join(" ")
        )?;
        for row in &self.rows {
            let ins: Vec<String> = row.inputs.iter().map(|b| b.to_string()).collect();
            let outs: Vec<String> = row
                .outputs
                .iter()
                .map(|r| match r {
                    Resolution::Value(bit) => bit.to_string(),
                    Resolution::Undetermined => "?".to_string(),
                    Resolution::Cycle(_) => "!".to_string(),
                })
                .collect();
            writeln!(f, "{} | {}", ins.join(" "), outs.join(" "))?;
        }
        Ok(())
    }
}
