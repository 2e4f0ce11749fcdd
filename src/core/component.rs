use super::components::registry::ComponentRegistry;
use super::components::types::ComponentKind;
use super::types::{Bit, ComponentId, Position};

/// A node in the circuit graph: a logic gate or an I/O terminal.
///
/// Wiring is not stored here. Input bindings and output fan-out are
/// derived from the circuit's connection index on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub(crate) id: ComponentId,
    pub(crate) kind: ComponentKind,
    pub(crate) position: Position,
    pub(crate) value: Option<Bit>,
}

impl Component {
    pub(crate) fn new(id: ComponentId, kind: ComponentKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            value: None,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Stored value: the toggle of an INPUT, or the last evaluated result
    /// of an OUTPUT. Always `None` for gates.
    pub fn value(&self) -> Option<Bit> {
        self.value
    }

    pub fn input_ports(&self) -> &'static [&'static str] {
        ComponentRegistry::input_ports(self.kind)
    }

    pub fn output_ports(&self) -> &'static [&'static str] {
        ComponentRegistry::output_ports(self.kind)
    }

    pub fn has_input_port(&self, port: &str) -> bool {
        self.input_ports().contains(&port)
    }

    pub fn has_output_port(&self, port: &str) -> bool {
        self.output_ports().contains(&port)
    }

    pub fn symbol(&self) -> &'static str {
        ComponentRegistry::symbol(self.kind)
    }
}
