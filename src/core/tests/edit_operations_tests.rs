use super::{and_circuit, circuit, place, value_of};
use crate::core::circuit::Circuit;
use crate::core::components::types::ComponentKind;
use crate::core::config::IdStrategy;
use crate::core::errors::CircuitError;
use crate::core::types::{Bit, ComponentId, ConnectionId, Position};

fn assert_consistent(c: &Circuit) {
    let violations = c.check_consistency();
    assert!(violations.is_empty(), "inconsistent circuit: {:?}", violations);
}

#[test]
fn test_new_components_get_kind_prefixed_ids() {
    let mut c = circuit();
    let a = c.add_component(ComponentKind::And, Position::default(), None);
    let b = c.add_component(ComponentKind::And, Position::default(), None);
    let n = c.add_component(ComponentKind::Nor, Position::default(), None);
    assert_eq!(a.as_str(), "AND-1");
    assert_eq!(b.as_str(), "AND-2");
    assert_eq!(n.as_str(), "NOR-3");

    let mut random = Circuit::with_id_strategy(IdStrategy::Uuid);
    let x = random.add_component(ComponentKind::Xor, Position::default(), None);
    let y = random.add_component(ComponentKind::Xor, Position::default(), None);
    assert!(x.as_str().starts_with("XOR-"));
    assert_ne!(x, y);
}

#[test]
fn test_sequential_ids_skip_taken_names() {
    let mut c = circuit();
    place(&mut c, "AND-1", ComponentKind::And);
    let next = c.add_component(ComponentKind::And, Position::default(), None);
    assert_eq!(next.as_str(), "AND-2");
}

#[test]
fn test_input_defaults_to_zero_and_gates_hold_no_value() {
    let mut c = circuit();
    let i = c.add_component(ComponentKind::Input, Position::default(), None);
    let g = c.add_component(ComponentKind::Nand, Position::default(), Some(Bit::One));
    assert_eq!(c.get_component(&i).unwrap().value(), Some(Bit::Zero));
    assert_eq!(c.get_component(&g).unwrap().value(), None);
}

#[test]
fn test_add_by_name_rejects_unknown_kind() {
    let mut c = circuit();
    assert!(c.add_component_named("xnor", Position::default(), None).is_ok());
    assert!(matches!(
        c.add_component_named("FLIPFLOP", Position::default(), None),
        Err(CircuitError::UnknownKind(_))
    ));
    assert_eq!(c.component_count(), 1);
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut c = circuit();
    place(&mut c, "X", ComponentKind::Or);
    let err = c
        .add_component_with_id("X", ComponentKind::And, Position::default(), None)
        .unwrap_err();
    assert!(matches!(err, CircuitError::DuplicateId(_)));
    assert_eq!(c.get_component(&ComponentId::from("X")).unwrap().kind(), ComponentKind::Or);
}

#[test]
fn test_connect_updates_both_indexes() {
    let c = and_circuit();
    assert_consistent(&c);
    assert_eq!(c.connection_count(), 3);

    let a1 = ComponentId::from("A1");
    assert_eq!(c.input_source(&a1, "in1"), Some(&ComponentId::from("I1")));
    assert_eq!(c.input_source(&a1, "in2"), Some(&ComponentId::from("I2")));
    let fanout = c.output_fanout(&a1);
    assert_eq!(fanout.len(), 1);
    assert_eq!(fanout[0].target_id, ComponentId::from("O1"));
    assert_eq!(fanout[0].target_port, "in");
}

#[test]
fn test_output_may_fan_out_to_many_inputs() {
    let mut c = circuit();
    place(&mut c, "I", ComponentKind::Input);
    place(&mut c, "N1", ComponentKind::Not);
    place(&mut c, "N2", ComponentKind::Not);
    c.connect_ports("I", "out", "N1", "in1").unwrap();
    c.connect_ports("I", "out", "N2", "in1").unwrap();
    assert_eq!(c.connections_from(&ComponentId::from("I")).len(), 2);
    assert_consistent(&c);
}

#[test]
fn test_self_connection_is_rejected() {
    let mut c = and_circuit();
    let before = c.to_json().unwrap();
    let err = c.connect_ports("A1", "out", "A1", "in1").unwrap_err();
    assert!(matches!(err, CircuitError::SelfConnection(_)));
    assert_eq!(c.to_json().unwrap(), before);
}

#[test]
fn test_second_driver_is_rejected() {
    let mut c = and_circuit();
    place(&mut c, "I3", ComponentKind::Input);
    let before = c.to_json().unwrap();
    let err = c.connect_ports("I3", "out", "A1", "in1").unwrap_err();
    assert!(matches!(err, CircuitError::PortAlreadyBound { .. }));
    assert_eq!(c.to_json().unwrap(), before);
}

#[test]
fn test_wrong_direction_and_unknown_ports_are_rejected() {
    let mut c = and_circuit();
    place(&mut c, "N", ComponentKind::Not);
    assert!(matches!(
        c.connect_ports("N", "in1", "O1", "in"),
        Err(CircuitError::InvalidPortDirection { .. })
    ));
    assert!(matches!(
        c.connect_ports("N", "out", "A1", "out"),
        Err(CircuitError::InvalidPortDirection { .. })
    ));
    assert!(matches!(
        c.connect_ports("N", "out", "missing", "in1"),
        Err(CircuitError::UnknownPort { .. })
    ));
    assert!(matches!(
        c.connect_ports("N", "carry", "A1", "in1"),
        Err(CircuitError::UnknownPort { .. })
    ));
    assert_eq!(c.connection_count(), 3);
    assert_consistent(&c);
}

#[test]
fn test_disconnect_frees_the_input() {
    let mut c = and_circuit();
    let wire = c
        .connections_to(&ComponentId::from("A1"), "in2")
        .unwrap()
        .id()
        .clone();
    let removed = c.disconnect(&wire).unwrap();
    assert_eq!(removed.source_id(), &ComponentId::from("I2"));
    assert!(c.input_source(&ComponentId::from("A1"), "in2").is_none());
    assert!(c.output_fanout(&ComponentId::from("I2")).is_empty());
    assert_consistent(&c);

    c.connect_ports("I1", "out", "A1", "in2").unwrap();
    assert_consistent(&c);
}

#[test]
fn test_disconnect_unknown_wire() {
    let mut c = and_circuit();
    let err = c.disconnect(&ConnectionId::from("nope")).unwrap_err();
    assert!(matches!(err, CircuitError::NotFound(_)));
    assert_eq!(c.connection_count(), 3);
}

#[test]
fn test_delete_cascades_to_every_wire() {
    let mut c = and_circuit();
    let deleted = c.delete_component(&ComponentId::from("A1")).unwrap();
    assert_eq!(deleted.component.kind(), ComponentKind::And);
    assert_eq!(deleted.connections.len(), 3);

    assert_eq!(c.connection_count(), 0);
    assert!(c.output_fanout(&ComponentId::from("I1")).is_empty());
    assert!(c.input_bindings(&ComponentId::from("O1")).is_empty());
    assert_consistent(&c);

    let json = c.to_json().unwrap();
    assert!(!json.contains("A1"));
}

#[test]
fn test_delete_input_leaves_gate_port_free() {
    let mut c = and_circuit();
    c.delete_component(&ComponentId::from("I1")).unwrap();
    assert!(c.input_source(&ComponentId::from("A1"), "in1").is_none());
    assert_eq!(c.connection_count(), 2);
    assert_consistent(&c);
}

#[test]
fn test_delete_unknown_component() {
    let mut c = and_circuit();
    assert!(matches!(
        c.delete_component(&ComponentId::from("Z")),
        Err(CircuitError::NotFound(_))
    ));
    assert_eq!(c.component_count(), 4);
}

#[test]
fn test_input_values_only_on_inputs() {
    let mut c = and_circuit();
    let i1 = ComponentId::from("I1");
    c.set_input_value(&i1, Bit::One).unwrap();
    assert_eq!(value_of(&c, "I1"), Some(Bit::One));
    assert_eq!(c.toggle_input(&i1).unwrap(), Bit::Zero);
    assert_eq!(c.toggle_input(&i1).unwrap(), Bit::One);

    assert!(matches!(
        c.set_input_value(&ComponentId::from("A1"), Bit::One),
        Err(CircuitError::WrongKind { .. })
    ));
    assert!(matches!(
        c.toggle_input(&ComponentId::from("O1")),
        Err(CircuitError::WrongKind { .. })
    ));
    assert!(matches!(
        c.set_input_value(&ComponentId::from("nope"), Bit::One),
        Err(CircuitError::NotFound(_))
    ));
}

#[test]
fn test_move_and_clear() {
    let mut c = and_circuit();
    let a1 = ComponentId::from("A1");
    c.move_component(&a1, Position::new(120.0, 45.5)).unwrap();
    assert_eq!(c.get_component(&a1).unwrap().position(), Position::new(120.0, 45.5));

    c.clear();
    assert!(c.is_empty());
    assert_eq!(c.to_json().unwrap(), r#"{"components":[],"connections":[]}"#);
    assert_consistent(&c);
}

#[test]
fn test_iteration_follows_insertion_order() {
    let c = and_circuit();
    let ids: Vec<&str> = c.components().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["I1", "I2", "A1", "O1"]);
    let wires: Vec<&str> = c.connections().map(|w| w.id().as_str()).collect();
    assert_eq!(wires, vec!["conn-1", "conn-2", "conn-3"]);
}
