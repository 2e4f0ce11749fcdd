use super::port_specs::PortSpec;
use super::types::{ComponentKind, PortType};
use crate::core::types::Bit;

const NO_PORTS: &[&str] = &[];
const OUT: &[&str] = &["out"];
const OUTPUT_IN: &[&str] = &["in"];
const UNARY_IN: &[&str] = &["in1"];
const BINARY_IN: &[&str] = &["in1", "in2"];

/// Static port table and gate semantics for every component kind.
///
/// The registry holds no state; every lookup is answered from the
/// fixed tables above.
pub struct ComponentRegistry;

impl ComponentRegistry {
    /// Ordered input-port names of a kind
    pub fn input_ports(kind: ComponentKind) -> &'static [&'static str] {
        match kind {
            ComponentKind::Input => NO_PORTS,
            ComponentKind::Output => OUTPUT_IN,
            ComponentKind::Not => UNARY_IN,
            ComponentKind::And
            | ComponentKind::Or
            | ComponentKind::Xor
            | ComponentKind::Nand
            | ComponentKind::Nor
            | ComponentKind::Xnor => BINARY_IN,
        }
    }

    /// Ordered output-port names of a kind
    pub fn output_ports(kind: ComponentKind) -> &'static [&'static str] {
        match kind {
            ComponentKind::Output => NO_PORTS,
            _ => OUT,
        }
    }

    /// Full port list, inputs first
    pub fn ports(kind: ComponentKind) -> Vec<PortSpec> {
        Self::input_ports(kind)
            .iter()
            .map(|name| PortSpec::input(name))
            .chain(Self::output_ports(kind).iter().map(|name| PortSpec::output(name)))
            .collect()
    }

    /// Direction of a named port, or `None` if the kind has no such port
    pub fn port_type(kind: ComponentKind, port: &str) -> Option<PortType> {
        if Self::input_ports(kind).contains(&port) {
            Some(PortType::Input)
        } else if Self::output_ports(kind).contains(&port) {
            Some(PortType::Output)
        } else {
            None
        }
    }

    /// Number of operands the kind consumes
    pub fn arity(kind: ComponentKind) -> usize {
        Self::input_ports(kind).len()
    }

    /// Display symbol used on the canvas and in truth tables
    pub fn symbol(kind: ComponentKind) -> &'static str {
        match kind {
            ComponentKind::Input => "I",
            ComponentKind::Output => "O",
            ComponentKind::And => "∧",
            ComponentKind::Or => "∨",
            ComponentKind::Not => "¬",
            ComponentKind::Xor => "⊕",
            ComponentKind::Nand => "↑",
            ComponentKind::Nor => "↓",
            ComponentKind::Xnor => "⊙",
        }
    }

    /// Apply the kind's boolean function to its operands.
    ///
    /// Operands are given in port order. Returns `None` when the operand
    /// count does not match the kind's arity, and always for `INPUT`,
    /// whose value is a stored toggle rather than a function. `OUTPUT`
    /// passes its single operand through.
    pub fn apply(kind: ComponentKind, operands: &[Bit]) -> Option<Bit> {
        match (kind, operands) {
            (ComponentKind::Output, [a]) => Some(*a),
            (ComponentKind::Not, [a]) => Some(!*a),
            (ComponentKind::And, [a, b]) => Some(Bit::from_bool(a.as_bool() && b.as_bool())),
            (ComponentKind::Or, [a, b]) => Some(Bit::from_bool(a.as_bool() || b.as_bool())),
            (ComponentKind::Xor, [a, b]) => Some(Bit::from_bool(a != b)),
            (ComponentKind::Nand, [a, b]) => Some(Bit::from_bool(!(a.as_bool() && b.as_bool()))),
            (ComponentKind::Nor, [a, b]) => Some(Bit::from_bool(!(a.as_bool() || b.as_bool()))),
            (ComponentKind::Xnor, [a, b]) => Some(Bit::from_bool(a == b)),
            _ => None,
        }
    }
}
