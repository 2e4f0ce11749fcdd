pub mod analysis;
pub mod circuit;
pub mod component;
pub mod components;
pub mod config;
pub mod connections;
pub mod edit;
pub mod errors;
pub mod execution;
pub mod persistence;
pub mod serialization;
pub mod types;
pub mod workbench;

#[cfg(test)]
mod tests;
