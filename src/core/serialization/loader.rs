use super::document::{CircuitDocument, ComponentRecord, FanoutRecord};
use crate::core::circuit::Circuit;
use crate::core::components::types::ComponentKind;
use crate::core::config::IdStrategy;
use crate::core::errors::{CircuitError, ConnectionFault, Result, Violation};
use crate::core::types::{ComponentId, ConnectionId, Position};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

impl Circuit {
    /// Build a circuit from a document, validating every invariant.
    ///
    /// The top-level connection list is authoritative. Every violation
    /// found is collected before failing, so one error lists them all.
    pub fn from_document(document: &CircuitDocument, strategy: IdStrategy) -> Result<Circuit> {
        let mut circuit = Circuit::with_id_strategy(strategy);
        let mut violations = Vec::new();
        let mut accepted = Vec::with_capacity(document.components.len());

        for record in &document.components {
            if record.value.is_some() && !record.kind.holds_value() {
                violations.push(Violation::UnexpectedValue {
                    component: record.id.clone(),
                    kind: record.kind,
                });
            }
            let position = Position::new(record.x, record.y);
            match circuit.add_component_with_id(record.id.clone(), record.kind, position, record.value) {
                Ok(id) => {
                    if record.kind == ComponentKind::Output {
                        circuit.write_output_value(&id, record.value);
                    }
                    accepted.push(record);
                }
                Err(_) => violations.push(Violation::DuplicateComponentId(record.id.clone())),
            }
        }

        for record in &document.connections {
            if circuit.has_connection(&record.id) {
                violations.push(Violation::DuplicateConnectionId(record.id.clone()));
                continue;
            }
            let missing: Vec<&ComponentId> = [&record.source_id, &record.target_id]
                .into_iter()
                .filter(|id| !circuit.has_component(id))
                .collect();
            if !missing.is_empty() {
                for id in missing {
                    violations.push(Violation::DanglingReference {
                        connection: record.id.clone(),
                        missing: id.clone(),
                    });
                }
                continue;
            }
            if let Err(fault) = circuit.connect_with_id(
                record.id.clone(),
                record.source_id.output(&record.source_port),
                record.target_id.input(&record.target_port),
            ) {
                violations.push(connection_violation(&record.id, fault));
            }
        }

        for record in accepted {
            violations.extend(check_mirrors(&circuit, record));
        }

        if violations.is_empty() {
            Ok(circuit)
        } else {
            Err(CircuitError::invalid(violations))
        }
    }

    /// Parse and validate canonical JSON into a new circuit
    pub fn from_json(json: &str, strategy: IdStrategy) -> Result<Circuit> {
        let document = CircuitDocument::from_json(json)?;
        Circuit::from_document(&document, strategy)
    }

    /// Replace the whole circuit with a validated document.
    ///
    /// On failure the current circuit is left untouched.
    pub fn load_circuit(&mut self, document: &CircuitDocument) -> Result<()> {
        match Circuit::from_document(document, self.id_strategy()) {
            Ok(loaded) => {
                info!(
                    "Loaded circuit with {} components and {} connections",
                    loaded.component_count(),
                    loaded.connection_count()
                );
                *self = loaded;
                Ok(())
            }
            Err(err) => {
                warn!("Rejected circuit load: {}", err);
                Err(err)
            }
        }
    }

    /// Replace the whole circuit with validated canonical JSON
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let document = CircuitDocument::from_json(json).map_err(|err| {
            warn!("Rejected circuit load: {}", err);
            err
        })?;
        self.load_circuit(&document)
    }
}

fn connection_violation(connection: &ConnectionId, fault: ConnectionFault) -> Violation {
    let connection = connection.clone();
    match fault {
        ConnectionFault::UnknownPort { component, port } => Violation::UnknownPort {
            connection,
            component,
            port,
        },
        ConnectionFault::InvalidPortDirection {
            component,
            port,
            expected,
        } => Violation::WrongDirection {
            connection,
            component,
            port,
            expected,
        },
        ConnectionFault::SelfConnection(_) => Violation::SelfConnection(connection),
        ConnectionFault::PortAlreadyBound { component, port, .. } => Violation::InputAlreadyBound {
            connection,
            component,
            port,
        },
    }
}

/// Compare a record's optional mirrors with what the connection list implies
fn check_mirrors(circuit: &Circuit, record: &ComponentRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(inputs) = &record.inputs {
        let declared: BTreeMap<String, ComponentId> = inputs
            .iter()
            .filter_map(|(port, source)| source.clone().map(|s| (port.clone(), s)))
            .collect();
        let actual = circuit.input_bindings(&record.id);
        if declared != actual {
            violations.push(Violation::MirrorMismatch {
                component: record.id.clone(),
                detail: format!("inputs {:?} but connections bind {:?}", declared, actual),
            });
        }
    }

    if let Some(fanout) = &record.connections {
        let mut declared: Vec<FanoutRecord> = fanout.clone();
        declared.sort();
        let mut actual: Vec<FanoutRecord> = circuit
            .output_fanout(&record.id)
            .into_iter()
            .map(FanoutRecord::from)
            .collect();
        actual.sort();
        if declared != actual {
            let declared: BTreeSet<_> = declared.iter().map(|f| &f.target_id).collect();
            let actual: BTreeSet<_> = actual.iter().map(|f| &f.target_id).collect();
            violations.push(Violation::MirrorMismatch {
                component: record.id.clone(),
                detail: format!(
                    "fan-out lists targets {:?} but connections reach {:?}",
                    declared, actual
                ),
            });
        }
    }

    violations
}
