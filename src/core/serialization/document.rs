use crate::core::circuit::Circuit;
use crate::core::components::types::ComponentKind;
use crate::core::connections::FanoutEntry;
use crate::core::errors::Result;
use crate::core::types::{Bit, ComponentId, ConnectionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical JSON form of a circuit, exchanged with persistence and the
/// circuit analyzer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitDocument {
    pub components: Vec<ComponentRecord>,
    pub connections: Vec<ConnectionRecord>,
}

/// One component entry.
///
/// `inputs` and `connections` mirror the top-level connection list. They
/// are always written, but may be omitted when reading; a `null` input
/// binding counts as unbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Bit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeMap<String, Option<ComponentId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<FanoutRecord>>,
}

/// A wire as seen from its source component
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanoutRecord {
    pub port: String,
    pub target_id: ComponentId,
    pub target_port: String,
}

impl From<FanoutEntry> for FanoutRecord {
    fn from(entry: FanoutEntry) -> Self {
        Self {
            port: entry.port,
            target_id: entry.target_id,
            target_port: entry.target_port,
        }
    }
}

/// One top-level connection entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: ConnectionId,
    pub source_id: ComponentId,
    pub source_port: String,
    pub target_id: ComponentId,
    pub target_port: String,
}

impl CircuitDocument {
    /// The canonical empty circuit: `{"components":[],"connections":[]}`
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.connections.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Circuit {
    /// Snapshot the circuit in canonical form, mirrors included
    pub fn to_document(&self) -> CircuitDocument {
        let components = self
            .components()
            .map(|component| {
                let inputs = self
                    .input_bindings(component.id())
                    .into_iter()
                    .map(|(port, source)| (port, Some(source)))
                    .collect();
                let fanout = self
                    .output_fanout(component.id())
                    .into_iter()
                    .map(FanoutRecord::from)
                    .collect();
                ComponentRecord {
                    id: component.id().clone(),
                    kind: component.kind(),
                    x: component.position().x,
                    y: component.position().y,
                    value: component.value(),
                    inputs: Some(inputs),
                    connections: Some(fanout),
                }
            })
            .collect();

        let connections = self
            .connections()
            .map(|connection| ConnectionRecord {
                id: connection.id().clone(),
                source_id: connection.source_id().clone(),
                source_port: connection.source_port().to_string(),
                target_id: connection.target_id().clone(),
                target_port: connection.target_port().to_string(),
            })
            .collect();

        CircuitDocument {
            components,
            connections,
        }
    }

    /// Compact canonical JSON
    pub fn to_json(&self) -> Result<String> {
        self.to_document().to_json()
    }

    /// Indented canonical JSON, for files meant to be read by people
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}
