//! Edit operations: the only way a [`Circuit`] is mutated.
//!
//! Each operation validates everything it needs before touching the graph,
//! so a rejected edit leaves the circuit exactly as it was.

use crate::core::circuit::Circuit;
use crate::core::component::Component;
use crate::core::components::types::ComponentKind;
use crate::core::connections::{Connection, ConnectionValidator};
use crate::core::errors::{CircuitError, ConnectionFault, Result};
use crate::core::types::{Bit, ComponentId, ConnectionId, InputPort, OutputPort, Position};
use log::{debug, info, warn};

/// What a cascading delete removed
#[derive(Debug, Clone)]
pub struct DeletedComponent {
    pub component: Component,
    pub connections: Vec<Connection>,
}

impl Circuit {
    /// Add a component with a freshly generated id.
    ///
    /// `initial` only applies to `INPUT`, which defaults to 0.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        position: Position,
        initial: Option<Bit>,
    ) -> ComponentId {
        let id = self.fresh_component_id(kind);
        self.insert_new_component(id.clone(), kind, position, initial);
        id
    }

    /// Add a component by kind name, e.g. `"NAND"`
    pub fn add_component_named(
        &mut self,
        kind: &str,
        position: Position,
        initial: Option<Bit>,
    ) -> Result<ComponentId> {
        let kind: ComponentKind = kind.parse()?;
        Ok(self.add_component(kind, position, initial))
    }

    /// Add a component under a caller-chosen id
    pub fn add_component_with_id(
        &mut self,
        id: impl Into<ComponentId>,
        kind: ComponentKind,
        position: Position,
        initial: Option<Bit>,
    ) -> Result<ComponentId> {
        let id = id.into();
        if self.has_component(&id) {
            warn!("Rejected add: component id '{}' already exists", id);
            return Err(CircuitError::DuplicateId(id));
        }
        self.insert_new_component(id.clone(), kind, position, initial);
        Ok(id)
    }

    fn insert_new_component(
        &mut self,
        id: ComponentId,
        kind: ComponentKind,
        position: Position,
        initial: Option<Bit>,
    ) {
        let mut component = Component::new(id, kind, position);
        if kind == ComponentKind::Input {
            component.value = Some(initial.unwrap_or(Bit::Zero));
        } else if initial.is_some() {
            debug!("Ignoring initial value for non-INPUT component '{}'", component.id);
        }
        debug!("Added {} component '{}'", kind, component.id);
        self.insert_component(component);
    }

    /// Connect an output port to an input port, minting a fresh connection id
    pub fn connect(&mut self, source: OutputPort, target: InputPort) -> Result<ConnectionId> {
        self.validate_new_connection(&source, &target)?;
        let id = self.fresh_connection_id();
        debug!(
            "Connected {}.{} -> {}.{} as '{}'",
            source.component_id(),
            source.port_name(),
            target.component_id(),
            target.port_name(),
            id
        );
        self.insert_connection(Connection::new(id.clone(), source, target));
        Ok(id)
    }

    /// Connect two ports given as raw ids and port names
    pub fn connect_ports(
        &mut self,
        source_id: impl Into<ComponentId>,
        source_port: &str,
        target_id: impl Into<ComponentId>,
        target_port: &str,
    ) -> Result<ConnectionId> {
        let source_id: ComponentId = source_id.into();
        let target_id: ComponentId = target_id.into();
        self.connect(source_id.output(source_port), target_id.input(target_port))
    }

    fn validate_new_connection(&self, source: &OutputPort, target: &InputPort) -> Result<()> {
        ConnectionValidator::validate_connection(
            source,
            self.get_component(source.component_id()),
            target,
            self.get_component(target.component_id()),
        )
        .and_then(|_| ConnectionValidator::check_input_port_collision(self.input_sources(), target))
        .map_err(|fault| {
            warn!("Rejected connection: {}", fault);
            CircuitError::from(fault)
        })
    }

    /// Remove a connection and clear both of its index entries
    pub fn disconnect(&mut self, id: &ConnectionId) -> Result<Connection> {
        match self.remove_connection_entry(id) {
            Some(connection) => {
                debug!(
                    "Disconnected '{}' ({}.{} -> {}.{})",
                    id,
                    connection.source_id(),
                    connection.source_port(),
                    connection.target_id(),
                    connection.target_port()
                );
                Ok(connection)
            }
            None => {
                warn!("Disconnect ignored: connection '{}' does not exist", id);
                Err(CircuitError::NotFound(id.to_string()))
            }
        }
    }

    /// Remove a component and every wire touching it.
    ///
    /// Surviving neighbours lose the bindings and fan-out entries that
    /// referenced the deleted id, so no dangling reference remains.
    pub fn delete_component(&mut self, id: &ComponentId) -> Result<DeletedComponent> {
        if !self.has_component(id) {
            warn!("Delete ignored: component '{}' does not exist", id);
            return Err(CircuitError::NotFound(id.to_string()));
        }

        let connections: Vec<Connection> = self
            .connections_touching(id)
            .iter()
            .filter_map(|c| self.remove_connection_entry(c))
            .collect();

        let component = self
            .remove_component_entry(id)
            .ok_or_else(|| CircuitError::NotFound(id.to_string()))?;

        debug!(
            "Deleted component '{}' and {} connection(s)",
            id,
            connections.len()
        );
        Ok(DeletedComponent {
            component,
            connections,
        })
    }

    /// Set the toggle of an `INPUT` component
    pub fn set_input_value(&mut self, id: &ComponentId, bit: Bit) -> Result<()> {
        let component = self.input_component_mut(id)?;
        component.value = Some(bit);
        debug!("Input '{}' set to {}", id, bit);
        Ok(())
    }

    /// Flip the toggle of an `INPUT` component, returning the new value
    pub fn toggle_input(&mut self, id: &ComponentId) -> Result<Bit> {
        let component = self.input_component_mut(id)?;
        let next = !component.value.unwrap_or(Bit::Zero);
        component.value = Some(next);
        debug!("Input '{}' toggled to {}", id, next);
        Ok(next)
    }

    fn input_component_mut(&mut self, id: &ComponentId) -> Result<&mut Component> {
        let component = self
            .component_mut(id)
            .ok_or_else(|| CircuitError::NotFound(id.to_string()))?;
        if component.kind != ComponentKind::Input {
            warn!("Rejected input change on '{}': kind is {}", id, component.kind);
            return Err(CircuitError::WrongKind {
                id: id.clone(),
                kind: component.kind,
                expected: ComponentKind::Input,
            });
        }
        Ok(component)
    }

    /// Update the layout position of a component
    pub fn move_component(&mut self, id: &ComponentId, position: Position) -> Result<()> {
        let component = self
            .component_mut(id)
            .ok_or_else(|| CircuitError::NotFound(id.to_string()))?;
        component.position = position;
        Ok(())
    }

    /// Remove every component and connection
    pub fn clear(&mut self) {
        info!(
            "Clearing circuit ({} components, {} connections)",
            self.component_count(),
            self.connection_count()
        );
        self.reset();
    }

    /// Insert a connection under a caller-chosen id, used when loading
    pub(crate) fn connect_with_id(
        &mut self,
        id: ConnectionId,
        source: OutputPort,
        target: InputPort,
    ) -> std::result::Result<(), ConnectionFault> {
        ConnectionValidator::validate_connection(
            &source,
            self.get_component(source.component_id()),
            &target,
            self.get_component(target.component_id()),
        )?;
        ConnectionValidator::check_input_port_collision(self.input_sources(), &target)?;
        self.insert_connection(Connection::new(id, source, target));
        Ok(())
    }

    /// Write an evaluation result onto an `OUTPUT` component
    pub(crate) fn write_output_value(&mut self, id: &ComponentId, value: Option<Bit>) {
        if let Some(component) = self.component_mut(id) {
            if component.kind == ComponentKind::Output {
                component.value = value;
            }
        }
    }
}
