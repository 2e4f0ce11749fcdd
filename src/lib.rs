pub mod core;

// Re-export commonly used types
pub use crate::core::analysis::{AnalysisOutcome, AnalysisRequest, AnalysisResponse, CircuitAnalyzer, GeneratedCircuit};
pub use crate::core::circuit::Circuit;
pub use crate::core::component::Component;
pub use crate::core::components::{ComponentKind, ComponentRegistry, PortType};
pub use crate::core::config::{IdStrategy, PlacementArea, WorkbenchConfig};
pub use crate::core::connections::Connection;
pub use crate::core::errors::{AnalyzerError, CircuitError, ConnectionFault, StoreError, Violation};
pub use crate::core::execution::{evaluate, EvaluationReport, Resolution, TruthTable};
pub use crate::core::persistence::{CircuitStore, FileStore, MemoryStore};
pub use crate::core::serialization::CircuitDocument;
pub use crate::core::types::{Bit, ComponentId, ConnectionId, Position};
pub use crate::core::workbench::Workbench;
