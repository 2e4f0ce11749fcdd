use crate::core::errors::CircuitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port direction for component interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortType {
    /// Input port - receives a single wire from another component
    Input,
    /// Output port - may drive any number of wires
    Output,
}

impl PortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::Input => "input",
            PortType::Output => "output",
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nine component kinds a circuit can contain.
///
/// Serialised as the upper-case name (`"AND"`, `"XNOR"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentKind {
    Input,
    Output,
    And,
    Or,
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl ComponentKind {
    /// All kinds in toolbar order
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Input,
        ComponentKind::Output,
        ComponentKind::And,
        ComponentKind::Or,
        ComponentKind::Not,
        ComponentKind::Xor,
        ComponentKind::Nand,
        ComponentKind::Nor,
        ComponentKind::Xnor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Input => "INPUT",
            ComponentKind::Output => "OUTPUT",
            ComponentKind::And => "AND",
            ComponentKind::Or => "OR",
            ComponentKind::Not => "NOT",
            ComponentKind::Xor => "XOR",
            ComponentKind::Nand => "NAND",
            ComponentKind::Nor => "NOR",
            ComponentKind::Xnor => "XNOR",
        }
    }

    /// True for the seven logic gates, false for the I/O terminals
    pub fn is_gate(&self) -> bool {
        !matches!(self, ComponentKind::Input | ComponentKind::Output)
    }

    /// Only terminals carry a stored value
    pub fn holds_value(&self) -> bool {
        matches!(self, ComponentKind::Input | ComponentKind::Output)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CircuitError::UnknownKind(s.to_string()))
    }
}
