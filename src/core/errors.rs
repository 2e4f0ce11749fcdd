//! Error types for circuit editing, loading and the external collaborators.

use super::components::types::{ComponentKind, PortType};
use super::types::{ComponentId, ConnectionId};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Every way an edit operation or a load can be rejected.
///
/// A rejected operation never leaves the circuit partially modified.
#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("Unknown component kind '{0}'")]
    UnknownKind(String),

    #[error("Component '{component}' has no port '{port}'")]
    UnknownPort { component: ComponentId, port: String },

    #[error("Port '{port}' on component '{component}' is not an {expected} port")]
    InvalidPortDirection {
        component: ComponentId,
        port: String,
        expected: PortType,
    },

    #[error("Cannot connect component '{0}' to itself")]
    SelfConnection(ComponentId),

    #[error("Input port '{port}' on component '{component}' is already connected by '{existing}'")]
    PortAlreadyBound {
        component: ComponentId,
        port: String,
        existing: ConnectionId,
    },

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("Component '{id}' is {kind}, operation requires {expected}")]
    WrongKind {
        id: ComponentId,
        kind: ComponentKind,
        expected: ComponentKind,
    },

    #[error("Component id '{0}' is already in use")]
    DuplicateId(ComponentId),

    #[error("Truth table needs {count} inputs, at most {limit} are supported")]
    TooManyInputs { count: usize, limit: usize },

    #[error("Invalid circuit: {}", format_violations(.violations))]
    InvalidCircuit { violations: Vec<Violation> },

    #[error("Invalid circuit JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CircuitError {
    /// Create an invalid circuit error from collected violations
    pub fn invalid(violations: Vec<Violation>) -> Self {
        Self::InvalidCircuit { violations }
    }

    /// True for the failures a load reports as an invalid circuit
    pub fn is_invalid_circuit(&self) -> bool {
        matches!(self, Self::InvalidCircuit { .. } | Self::Json(_))
    }
}

/// Why a single prospective wire is refused.
///
/// Narrower than [`CircuitError`]: a loader turns each case into a
/// [`Violation`], an interactive edit into the matching `CircuitError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionFault {
    #[error("Component '{component}' has no port '{port}'")]
    UnknownPort { component: ComponentId, port: String },

    #[error("Port '{port}' on component '{component}' is not an {expected} port")]
    InvalidPortDirection {
        component: ComponentId,
        port: String,
        expected: PortType,
    },

    #[error("Cannot connect component '{0}' to itself")]
    SelfConnection(ComponentId),

    #[error("Input port '{port}' on component '{component}' is already connected by '{existing}'")]
    PortAlreadyBound {
        component: ComponentId,
        port: String,
        existing: ConnectionId,
    },
}

impl From<ConnectionFault> for CircuitError {
    fn from(fault: ConnectionFault) -> Self {
        match fault {
            ConnectionFault::UnknownPort { component, port } => {
                CircuitError::UnknownPort { component, port }
            }
            ConnectionFault::InvalidPortDirection {
                component,
                port,
                expected,
            } => CircuitError::InvalidPortDirection {
                component,
                port,
                expected,
            },
            ConnectionFault::SelfConnection(id) => CircuitError::SelfConnection(id),
            ConnectionFault::PortAlreadyBound {
                component,
                port,
                existing,
            } => CircuitError::PortAlreadyBound {
                component,
                port,
                existing,
            },
        }
    }
}

/// A structural problem found while validating a serialized circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    DuplicateComponentId(ComponentId),
    DuplicateConnectionId(ConnectionId),
    DanglingReference {
        connection: ConnectionId,
        missing: ComponentId,
    },
    UnknownPort {
        connection: ConnectionId,
        component: ComponentId,
        port: String,
    },
    WrongDirection {
        connection: ConnectionId,
        component: ComponentId,
        port: String,
        expected: PortType,
    },
    SelfConnection(ConnectionId),
    InputAlreadyBound {
        connection: ConnectionId,
        component: ComponentId,
        port: String,
    },
    MirrorMismatch {
        component: ComponentId,
        detail: String,
    },
    UnexpectedValue {
        component: ComponentId,
        kind: ComponentKind,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateComponentId(id) => write!(f, "duplicate component id '{}'", id),
            Violation::DuplicateConnectionId(id) => write!(f, "duplicate connection id '{}'", id),
            Violation::DanglingReference { connection, missing } => write!(
                f,
                "connection '{}' references missing component '{}'",
                connection, missing
            ),
            Violation::UnknownPort { connection, component, port } => write!(
                f,
                "connection '{}' uses unknown port '{}' on '{}'",
                connection, port, component
            ),
            Violation::WrongDirection { connection, component, port, expected } => write!(
                f,
                "connection '{}' uses '{}' on '{}' where an {} port is required",
                connection, port, component, expected
            ),
            Violation::SelfConnection(connection) => {
                write!(f, "connection '{}' connects a component to itself", connection)
            }
            Violation::InputAlreadyBound { connection, component, port } => write!(
                f,
                "connection '{}' binds input '{}' on '{}' a second time",
                connection, port, component
            ),
            Violation::MirrorMismatch { component, detail } => {
                write!(f, "component '{}' disagrees with the connection list: {}", component, detail)
            }
            Violation::UnexpectedValue { component, kind } => {
                write!(f, "component '{}' of kind {} cannot carry a value", component, kind)
            }
        }
    }
}

/// Failures of the persistence collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access circuit store at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored circuit is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored circuit was rejected: {0}")]
    Circuit(#[from] CircuitError),
}

/// Failures of the circuit analyzer collaborator
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Nothing to analyze: the canvas and the description are both empty")]
    NothingToAnalyze,

    #[error("Analyzer request failed: {0}")]
    Transport(String),

    #[error("Analyzer returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Circuit could not be serialized for analysis: {0}")]
    Circuit(#[from] CircuitError),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_circuit_message_lists_every_violation() {
        let err = CircuitError::invalid(vec![
            Violation::DuplicateComponentId(ComponentId::new("A1")),
            Violation::SelfConnection(ConnectionId::new("c1")),
        ]);
        let message = err.to_string();
        assert!(message.contains("duplicate component id 'A1'"));
        assert!(message.contains("connection 'c1' connects a component to itself"));
        assert!(err.is_invalid_circuit());
    }

    #[test]
    fn test_port_already_bound_names_existing_connection() {
        let err = CircuitError::PortAlreadyBound {
            component: ComponentId::new("A1"),
            port: "in1".to_string(),
            existing: ConnectionId::new("conn-3"),
        };
        assert_eq!(
            err.to_string(),
            "Input port 'in1' on component 'A1' is already connected by 'conn-3'"
        );
        assert!(!err.is_invalid_circuit());
    }

    #[test]
    fn test_connection_fault_keeps_its_message() {
        let fault = ConnectionFault::InvalidPortDirection {
            component: ComponentId::new("N"),
            port: "out".to_string(),
            expected: PortType::Input,
        };
        let message = fault.to_string();
        let err = CircuitError::from(fault);
        assert!(matches!(
            err,
            CircuitError::InvalidPortDirection { expected: PortType::Input, .. }
        ));
        assert_eq!(err.to_string(), message);
    }
}
