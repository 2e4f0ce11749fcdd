use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a component inside a circuit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub(crate) String);

impl ComponentId {
    /// Create a new component ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create an output port handle
    pub fn output(&self, port: &str) -> OutputPort {
        OutputPort {
            component_id: self.clone(),
            port_name: port.to_string(),
        }
    }

    /// Create an input port handle
    pub fn input(&self, port: &str) -> InputPort {
        InputPort {
            component_id: self.clone(),
            port_name: port.to_string(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a connection (wire) inside a circuit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub(crate) String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Handle for an output port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputPort {
    pub(crate) component_id: ComponentId,
    pub(crate) port_name: String,
}

impl OutputPort {
    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

/// Handle for an input port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputPort {
    pub(crate) component_id: ComponentId,
    pub(crate) port_name: String,
}

impl InputPort {
    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

/// A single logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Build a bit from a boolean
    pub fn from_bool(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// Build a bit from its numeric form; anything but 0 or 1 is rejected
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Bit::Zero),
            1 => Some(Bit::One),
            _ => None,
        }
    }

    pub fn as_bool(self) -> bool {
        self == Bit::One
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl std::ops::Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit::from_bool(value)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Bit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Bit {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Bit::from_u8(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("bit must be 0 or 1, got {}", raw)))
    }
}

/// Canvas position of a component. Layout only, never read by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_handles_carry_component_and_port() {
        let id = ComponentId::new("A1");
        let out = id.output("out");
        let input = id.input("in2");

        assert_eq!(out.component_id(), &id);
        assert_eq!(out.port_name(), "out");
        assert_eq!(input.component_id().as_str(), "A1");
        assert_eq!(input.port_name(), "in2");
    }

    #[test]
    fn test_bit_rejects_values_outside_zero_and_one() {
        assert_eq!(Bit::from_u8(0), Some(Bit::Zero));
        assert_eq!(Bit::from_u8(1), Some(Bit::One));
        assert_eq!(Bit::from_u8(2), None);

        let parsed: Result<Bit, _> = serde_json::from_str("2");
        assert!(parsed.is_err());
        let parsed: Bit = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Bit::One);
    }

    #[test]
    fn test_bit_negation() {
        assert_eq!(!Bit::Zero, Bit::One);
        assert_eq!(!Bit::One, Bit::Zero);
    }
}
