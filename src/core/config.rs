//! Configuration for the circuit workbench
//!
//! Controls how fresh ids are minted, where new components are dropped
//! on the canvas, and which persistence slot the circuit is saved under.

use crate::core::components::types::ComponentKind;
use uuid::Uuid;

/// Default persistence slot, the same key the web front end stores under
pub const DEFAULT_STORAGE_SLOT: &str = "logicLabCurrentCircuit";

/// Strategy for generating component and connection ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Kind-prefixed random UUID v4, e.g. `AND-6f1c...`
    #[default]
    Uuid,
    /// Kind-prefixed counter, e.g. `AND-3`; deterministic across runs
    Sequential,
}

/// Mints fresh ids according to an [`IdStrategy`]
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counter: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy, counter: 0 }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Next candidate component id; the caller re-draws on collision
    pub fn component_id(&mut self, kind: ComponentKind) -> String {
        self.next_with_prefix(kind.name())
    }

    /// Next candidate connection id; the caller re-draws on collision
    pub fn connection_id(&mut self) -> String {
        self.next_with_prefix("conn")
    }

    fn next_with_prefix(&mut self, prefix: &str) -> String {
        match self.strategy {
            IdStrategy::Uuid => format!("{}-{}", prefix, Uuid::new_v4().simple()),
            IdStrategy::Sequential => {
                self.counter += 1;
                format!("{}-{}", prefix, self.counter)
            }
        }
    }
}

/// Rectangle new components are randomly placed into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PlacementArea {
    fn default() -> Self {
        Self {
            x: 30.0,
            y: 30.0,
            width: 200.0,
            height: 150.0,
        }
    }
}

/// Configuration for a workbench session
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// How fresh component and connection ids are generated
    pub id_strategy: IdStrategy,
    /// Where components without an explicit position are dropped
    pub placement: PlacementArea,
    /// Persistence slot used by save and load
    pub storage_slot: String,
}

impl WorkbenchConfig {
    /// Create a new configuration with default values
    ///
    /// Defaults to UUID ids, a 200x150 drop area at (30, 30)
    /// and the `logicLabCurrentCircuit` slot.
    pub fn new() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            placement: PlacementArea::default(),
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
        }
    }

    /// Set the id strategy
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Set the placement area for new components
    pub fn with_placement(mut self, placement: PlacementArea) -> Self {
        self.placement = placement;
        self
    }

    /// Set the persistence slot
    pub fn with_storage_slot(mut self, slot: impl Into<String>) -> Self {
        self.storage_slot = slot.into();
        self
    }
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkbenchConfig::default();
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.placement, PlacementArea::default());
        assert_eq!(config.storage_slot, "logicLabCurrentCircuit");
    }

    #[test]
    fn test_config_builder() {
        let area = PlacementArea { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        let config = WorkbenchConfig::new()
            .with_id_strategy(IdStrategy::Sequential)
            .with_placement(area)
            .with_storage_slot("scratch");

        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert_eq!(config.placement, area);
        assert_eq!(config.storage_slot, "scratch");
    }

    #[test]
    fn test_sequential_ids_are_kind_prefixed_and_increasing() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        assert_eq!(ids.component_id(ComponentKind::And), "AND-1");
        assert_eq!(ids.component_id(ComponentKind::Input), "INPUT-2");
        assert_eq!(ids.connection_id(), "conn-3");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut ids = IdGenerator::new(IdStrategy::Uuid);
        let a = ids.component_id(ComponentKind::Xor);
        let b = ids.component_id(ComponentKind::Xor);
        assert!(a.starts_with("XOR-"));
        assert_ne!(a, b);
    }
}
