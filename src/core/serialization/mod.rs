//! Canonical JSON contract shared with persistence and the circuit analyzer.

pub mod document;
pub mod loader;

pub use document::{CircuitDocument, ComponentRecord, ConnectionRecord, FanoutRecord};
