use super::types::PortType;

/// Port specification for component inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    /// Port name
    pub name: &'static str,
    /// Port direction
    pub port_type: PortType,
    /// Whether the component needs this port bound to produce a value
    pub required: bool,
}

impl PortSpec {
    /// Create a new required input port
    pub fn input(name: &'static str) -> Self {
        Self {
            name,
            port_type: PortType::Input,
            required: true,
        }
    }

    /// Create a new output port
    pub fn output(name: &'static str) -> Self {
        Self {
            name,
            port_type: PortType::Output,
            required: false, // outputs are never "required" to be wired
        }
    }

    pub fn is_input(&self) -> bool {
        self.port_type == PortType::Input
    }

    pub fn is_output(&self) -> bool {
        self.port_type == PortType::Output
    }
}
