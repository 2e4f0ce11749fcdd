mod edit_operations_tests;

use crate::core::circuit::Circuit;
use crate::core::components::types::ComponentKind;
use crate::core::config::IdStrategy;
use crate::core::types::{Bit, ComponentId, Position};

/// Empty circuit with deterministic ids
pub(super) fn circuit() -> Circuit {
    Circuit::with_id_strategy(IdStrategy::Sequential)
}

/// Add a component under a fixed id at the origin
pub(super) fn place(circuit: &mut Circuit, id: &str, kind: ComponentKind) -> ComponentId {
    circuit
        .add_component_with_id(id, kind, Position::default(), None)
        .unwrap()
}

/// `I1`, `I2` -> `A1` (AND) -> `O1`, both inputs at 0
pub(super) fn and_circuit() -> Circuit {
    let mut c = circuit();
    place(&mut c, "I1", ComponentKind::Input);
    place(&mut c, "I2", ComponentKind::Input);
    place(&mut c, "A1", ComponentKind::And);
    place(&mut c, "O1", ComponentKind::Output);
    c.connect_ports("I1", "out", "A1", "in1").unwrap();
    c.connect_ports("I2", "out", "A1", "in2").unwrap();
    c.connect_ports("A1", "out", "O1", "in").unwrap();
    c
}

pub(super) fn value_of(circuit: &Circuit, id: &str) -> Option<Bit> {
    circuit
        .get_component(&ComponentId::from(id))
        .and_then(|c| c.value())
}
