use crate::core::types::{ComponentId, ConnectionId, InputPort, OutputPort};

/// A directed wire from one component's output port to another
/// component's input port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub(crate) id: ConnectionId,
    pub(crate) source: OutputPort,
    pub(crate) target: InputPort,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, source: OutputPort, target: InputPort) -> Self {
        Self { id, source, target }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn source(&self) -> &OutputPort {
        &self.source
    }

    pub fn target(&self) -> &InputPort {
        &self.target
    }

    pub fn source_id(&self) -> &ComponentId {
        self.source.component_id()
    }

    pub fn source_port(&self) -> &str {
        self.source.port_name()
    }

    pub fn target_id(&self) -> &ComponentId {
        self.target.component_id()
    }

    pub fn target_port(&self) -> &str {
        self.target.port_name()
    }

    /// True if either end touches the given component
    pub fn touches(&self, id: &ComponentId) -> bool {
        self.source_id() == id || self.target_id() == id
    }

    /// The fan-out entry this wire contributes to its source component
    pub fn fanout_entry(&self) -> FanoutEntry {
        FanoutEntry {
            port: self.source_port().to_string(),
            target_id: self.target_id().clone(),
            target_port: self.target_port().to_string(),
        }
    }
}

/// One wire leaving a component, seen from the source side
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FanoutEntry {
    pub port: String,
    pub target_id: ComponentId,
    pub target_port: String,
}
