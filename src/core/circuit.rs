use super::component::Component;
use super::components::types::ComponentKind;
use super::config::{IdGenerator, IdStrategy};
use super::connections::{Connection, FanoutEntry};
use super::errors::Violation;
use super::types::{ComponentId, ConnectionId};
use std::collections::{BTreeMap, HashMap};

/// The circuit graph: components keyed by id plus the wires between them.
///
/// Connections are the single source of truth for wiring. Two indexes are
/// maintained incrementally on every mutation so that both directions of
/// lookup stay cheap:
/// - `input_sources`: (target, input port) -> the one connection driving it
/// - `output_targets`: source -> connections leaving it, in creation order
///
/// Mutation goes through the edit operations in [`crate::core::edit`].
#[derive(Debug, Clone)]
pub struct Circuit {
    components: HashMap<ComponentId, Component>,
    component_order: Vec<ComponentId>,
    connections: HashMap<ConnectionId, Connection>,
    connection_order: Vec<ConnectionId>,
    input_sources: HashMap<(ComponentId, String), ConnectionId>,
    output_targets: HashMap<ComponentId, Vec<ConnectionId>>,
    ids: IdGenerator,
}

impl Circuit {
    /// Create an empty circuit minting UUID-based ids
    pub fn new() -> Self {
        Self::with_id_strategy(IdStrategy::default())
    }

    /// Create an empty circuit with the given id strategy
    pub fn with_id_strategy(strategy: IdStrategy) -> Self {
        Self {
            components: HashMap::new(),
            component_order: Vec::new(),
            connections: HashMap::new(),
            connection_order: Vec::new(),
            input_sources: HashMap::new(),
            output_targets: HashMap::new(),
            ids: IdGenerator::new(strategy),
        }
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.ids.strategy()
    }

    /// Get a component by ID
    pub fn get_component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Get a connection by ID
    pub fn get_connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Check if a component exists
    pub fn has_component(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// All wires leaving a component, in creation order
    pub fn connections_from(&self, id: &ComponentId) -> Vec<&Connection> {
        self.output_targets
            .get(id)
            .map(|ids| ids.iter().filter_map(|c| self.connections.get(c)).collect())
            .unwrap_or_default()
    }

    /// The wire bound to an input port, if any
    pub fn connections_to(&self, id: &ComponentId, port: &str) -> Option<&Connection> {
        self.input_sources
            .get(&(id.clone(), port.to_string()))
            .and_then(|c| self.connections.get(c))
    }

    /// Id of the component driving an input port
    pub fn input_source(&self, id: &ComponentId, port: &str) -> Option<&ComponentId> {
        self.connections_to(id, port).map(Connection::source_id)
    }

    /// Port name -> driving component for every bound input of a component
    pub fn input_bindings(&self, id: &ComponentId) -> BTreeMap<String, ComponentId> {
        let Some(component) = self.components.get(id) else {
            return BTreeMap::new();
        };
        component
            .input_ports()
            .iter()
            .filter_map(|port| {
                self.input_source(id, port)
                    .map(|source| (port.to_string(), source.clone()))
            })
            .collect()
    }

    /// Wires leaving a component, seen from the source side
    pub fn output_fanout(&self, id: &ComponentId) -> Vec<FanoutEntry> {
        self.connections_from(id)
            .into_iter()
            .map(Connection::fanout_entry)
            .collect()
    }

    /// All components in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.component_order
            .iter()
            .filter_map(move |id| self.components.get(id))
    }

    /// All connections in creation order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connection_order
            .iter()
            .filter_map(move |id| self.connections.get(id))
    }

    /// Components of one kind, in insertion order
    pub fn components_of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> + '_ {
        self.components().filter(move |c| c.kind() == kind)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.connections.is_empty()
    }

    /// Audit the graph against its structural invariants.
    ///
    /// Returns every violation found; an empty list means every wire has
    /// both endpoints present, every input port has at most one driver,
    /// and both indexes agree exactly with the connection list.
    pub fn check_consistency(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut seen_inputs: HashMap<(ComponentId, String), ConnectionId> = HashMap::new();

        for connection in self.connections() {
            for end in [connection.source_id(), connection.target_id()] {
                if !self.components.contains_key(end) {
                    violations.push(Violation::DanglingReference {
                        connection: connection.id().clone(),
                        missing: end.clone(),
                    });
                }
            }

            let key = (connection.target_id().clone(), connection.target_port().to_string());
            if seen_inputs.insert(key.clone(), connection.id().clone()).is_some() {
                violations.push(Violation::InputAlreadyBound {
                    connection: connection.id().clone(),
                    component: key.0.clone(),
                    port: key.1.clone(),
                });
            }
            if self.input_sources.get(&key) != Some(connection.id()) {
                violations.push(Violation::MirrorMismatch {
                    component: key.0.clone(),
                    detail: format!("input '{}' is not indexed to '{}'", key.1, connection.id()),
                });
            }

            let listed = self
                .output_targets
                .get(connection.source_id())
                .map_or(false, |ids| ids.contains(connection.id()));
            if !listed {
                violations.push(Violation::MirrorMismatch {
                    component: connection.source_id().clone(),
                    detail: format!("fan-out is missing '{}'", connection.id()),
                });
            }
        }

        for ((component, port), connection) in &self.input_sources {
            if seen_inputs.get(&(component.clone(), port.clone())) != Some(connection) {
                violations.push(Violation::MirrorMismatch {
                    component: component.clone(),
                    detail: format!("stale input binding on '{}'", port),
                });
            }
        }

        for (source, ids) in &self.output_targets {
            for id in ids {
                let matches = self
                    .connections
                    .get(id)
                    .map_or(false, |c| c.source_id() == source);
                if !matches {
                    violations.push(Violation::MirrorMismatch {
                        component: source.clone(),
                        detail: format!("stale fan-out entry '{}'", id),
                    });
                }
            }
        }

        violations
    }

    // ---- internal mutation, used by the edit operations ----

    pub(crate) fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub(crate) fn input_sources(&self) -> &HashMap<(ComponentId, String), ConnectionId> {
        &self.input_sources
    }

    pub(crate) fn has_connection(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    /// Insert a component whose id is known to be unused
    pub(crate) fn insert_component(&mut self, component: Component) {
        self.component_order.push(component.id.clone());
        self.components.insert(component.id.clone(), component);
    }

    /// Remove a component only; callers detach its wires first
    pub(crate) fn remove_component_entry(&mut self, id: &ComponentId) -> Option<Component> {
        let removed = self.components.remove(id)?;
        self.component_order.retain(|c| c != id);
        self.output_targets.remove(id);
        Some(removed)
    }

    /// Insert a validated connection and update both indexes
    pub(crate) fn insert_connection(&mut self, connection: Connection) {
        let key = (
            connection.target_id().clone(),
            connection.target_port().to_string(),
        );
        self.input_sources.insert(key, connection.id.clone());
        self.output_targets
            .entry(connection.source_id().clone())
            .or_default()
            .push(connection.id.clone());
        self.connection_order.push(connection.id.clone());
        self.connections.insert(connection.id.clone(), connection);
    }

    /// Remove a connection and its index entries
    pub(crate) fn remove_connection_entry(&mut self, id: &ConnectionId) -> Option<Connection> {
        let connection = self.connections.remove(id)?;
        self.connection_order.retain(|c| c != id);

        let key = (
            connection.target_id().clone(),
            connection.target_port().to_string(),
        );
        if self.input_sources.get(&key) == Some(id) {
            self.input_sources.remove(&key);
        }

        if let Some(targets) = self.output_targets.get_mut(connection.source_id()) {
            targets.retain(|c| c != id);
            if targets.is_empty() {
                self.output_targets.remove(connection.source_id());
            }
        }

        Some(connection)
    }

    /// Ids of every connection touching a component, in creation order
    pub(crate) fn connections_touching(&self, id: &ComponentId) -> Vec<ConnectionId> {
        self.connections()
            .filter(|c| c.touches(id))
            .map(|c| c.id().clone())
            .collect()
    }

    /// A component id that is not yet taken
    pub(crate) fn fresh_component_id(&mut self, kind: ComponentKind) -> ComponentId {
        loop {
            let candidate = ComponentId::new(self.ids.component_id(kind));
            if !self.components.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// A connection id that is not yet taken
    pub(crate) fn fresh_connection_id(&mut self) -> ConnectionId {
        loop {
            let candidate = ConnectionId::new(self.ids.connection_id());
            if !self.connections.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Drop every component and connection, keeping the id generator
    pub(crate) fn reset(&mut self) {
        self.components.clear();
        self.component_order.clear();
        self.connections.clear();
        self.connection_order.clear();
        self.input_sources.clear();
        self.output_targets.clear();
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}
