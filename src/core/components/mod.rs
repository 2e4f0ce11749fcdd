pub mod port_specs;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use port_specs::PortSpec;
pub use registry::ComponentRegistry;
pub use types::{ComponentKind, PortType};
