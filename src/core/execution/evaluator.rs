use crate::core::circuit::Circuit;
use crate::core::components::registry::ComponentRegistry;
use crate::core::components::types::ComponentKind;
use crate::core::types::{Bit, ComponentId};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

/// Outcome of resolving one component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The component settles to a bit
    Value(Bit),
    /// An input upstream is unbound, so no value exists
    Undetermined,
    /// The resolution chain re-entered the given component
    Cycle(ComponentId),
}

impl Resolution {
    pub fn value(&self) -> Option<Bit> {
        match self {
            Resolution::Value(bit) => Some(*bit),
            _ => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Resolution::Value(_))
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Resolution::Cycle(_))
    }
}

/// Memoized resolver over an immutable circuit.
///
/// The memo table lives for the whole run so shared sub-circuits are
/// computed once. The set of components on the current chain is fresh
/// for every top-level [`Evaluator::resolve`] call, so two OUTPUTs that
/// reach the same gate never mistake it for feedback.
///
/// Resolution walks an explicit stack, so chain depth is bounded by heap
/// rather than by the thread's stack.
pub struct Evaluator<'a> {
    circuit: &'a Circuit,
    memo: HashMap<ComponentId, Resolution>,
}

/// Work item on the resolution stack
enum Step {
    /// Visit a component: settle it directly or schedule its operands
    Enter(ComponentId),
    /// Every operand is settled or on the chain; combine them
    Combine(ComponentId, ComponentKind),
}

impl<'a> Evaluator<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            memo: HashMap::new(),
        }
    }

    /// Resolve one component, starting a fresh resolution chain
    pub fn resolve(&mut self, id: &ComponentId) -> Resolution {
        let circuit = self.circuit;
        let mut visiting: HashSet<ComponentId> = HashSet::new();
        let mut stack = vec![Step::Enter(id.clone())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(current) => {
                    // on the chain: the parent reads it back as a cycle
                    if self.memo.contains_key(&current) || visiting.contains(&current) {
                        continue;
                    }
                    let Some(component) = circuit.get_component(&current) else {
                        continue;
                    };
                    let kind = component.kind();
                    if kind == ComponentKind::Input {
                        let bit = component.value().unwrap_or(Bit::Zero);
                        self.memo.insert(current, Resolution::Value(bit));
                        continue;
                    }

                    let sources: Vec<ComponentId> = ComponentRegistry::input_ports(kind)
                        .iter()
                        .filter_map(|port| circuit.input_source(&current, port).cloned())
                        .collect();
                    visiting.insert(current.clone());
                    stack.push(Step::Combine(current, kind));
                    // reversed so operands settle in port order
                    stack.extend(sources.into_iter().rev().map(Step::Enter));
                }
                Step::Combine(current, kind) => {
                    visiting.remove(&current);
                    let resolution = self.combine(&current, kind, &visiting);
                    self.memo.insert(current, resolution);
                }
            }
        }

        self.memo
            .get(id)
            .cloned()
            .unwrap_or(Resolution::Undetermined)
    }

    /// Read back a settled operand; one still on the chain is feedback
    fn operand(&self, source: &ComponentId, visiting: &HashSet<ComponentId>) -> Resolution {
        match self.memo.get(source) {
            Some(resolution) => resolution.clone(),
            None if visiting.contains(source) => Resolution::Cycle(source.clone()),
            None => Resolution::Undetermined,
        }
    }

    /// Combine the operands of every input port, then apply the gate.
    ///
    /// All bound operands are inspected even after one fails so a feedback
    /// loop behind the second port is still reported; a cycle outranks
    /// an undetermined operand.
    fn combine(
        &self,
        id: &ComponentId,
        kind: ComponentKind,
        visiting: &HashSet<ComponentId>,
    ) -> Resolution {
        let mut operands = Vec::with_capacity(ComponentRegistry::arity(kind));
        let mut cycle = None;
        let mut undetermined = false;

        for port in ComponentRegistry::input_ports(kind) {
            let Some(source) = self.circuit.input_source(id, port) else {
                undetermined = true;
                continue;
            };
            match self.operand(source, visiting) {
                Resolution::Value(bit) => operands.push(bit),
                Resolution::Undetermined => undetermined = true,
                Resolution::Cycle(entry) => {
                    cycle.get_or_insert(entry);
                }
            }
        }

        if let Some(entry) = cycle {
            return Resolution::Cycle(entry);
        }
        if undetermined {
            return Resolution::Undetermined;
        }
        ComponentRegistry::apply(kind, &operands)
            .map(Resolution::Value)
            .unwrap_or(Resolution::Undetermined)
    }

    /// Resolve every OUTPUT, then every remaining component, and report
    pub fn run(mut self) -> EvaluationReport {
        let circuit = self.circuit;
        let mut outputs = Vec::new();

        for output in circuit.components_of_kind(ComponentKind::Output) {
            let resolution = self.resolve(output.id());
            match &resolution {
                Resolution::Cycle(entry) => warn!(
                    "Combinational cycle detected through '{}' while resolving output '{}'",
                    entry,
                    output.id()
                ),
                Resolution::Undetermined => {
                    debug!("Output '{}' is undetermined", output.id())
                }
                Resolution::Value(bit) => debug!("Output '{}' = {}", output.id(), bit),
            }
            outputs.push((output.id().clone(), resolution));
        }

        for component in circuit.components() {
            if !self.memo.contains_key(component.id()) {
                self.resolve(component.id());
            }
        }

        let report = EvaluationReport {
            outputs,
            values: self.memo,
        };
        info!(
            "Simulation resolved {}/{} outputs ({} cycle(s))",
            report.resolved_count(),
            report.outputs.len(),
            report.cycles().len()
        );
        report
    }
}

/// Results of one evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    outputs: Vec<(ComponentId, Resolution)>,
    values: HashMap<ComponentId, Resolution>,
}

impl EvaluationReport {
    /// Per-OUTPUT outcomes, in circuit order
    pub fn outputs(&self) -> &[(ComponentId, Resolution)] {
        &self.outputs
    }

    /// Outcome for one OUTPUT component
    pub fn output(&self, id: &ComponentId) -> Option<&Resolution> {
        self.outputs
            .iter()
            .find(|(output, _)| output == id)
            .map(|(_, resolution)| resolution)
    }

    /// Outcome for any component, gates included
    pub fn resolution(&self, id: &ComponentId) -> Option<&Resolution> {
        self.values.get(id)
    }

    /// Cycle entry points reported by OUTPUTs, deduplicated, in output order
    pub fn cycles(&self) -> Vec<&ComponentId> {
        let mut seen = Vec::new();
        for (_, resolution) in &self.outputs {
            if let Resolution::Cycle(entry) = resolution {
                if !seen.contains(&entry) {
                    seen.push(entry);
                }
            }
        }
        seen
    }

    pub fn resolved_count(&self) -> usize {
        self.outputs.iter().filter(|(_, r)| r.is_value()).count()
    }

    /// True when every OUTPUT settled to a bit
    pub fn is_fully_resolved(&self) -> bool {
        self.resolved_count() == self.outputs.len()
    }

    /// Write OUTPUT results onto the circuit; unresolved outputs are cleared
    pub fn apply(&self, circuit: &mut Circuit) {
        for (id, resolution) in &self.outputs {
            circuit.write_output_value(id, resolution.value());
        }
    }
}

/// Evaluate a circuit and write the results back onto its OUTPUTs
pub fn evaluate(circuit: &mut Circuit) -> EvaluationReport {
    let report = Evaluator::new(circuit).run();
    report.apply(circuit);
    report
}
