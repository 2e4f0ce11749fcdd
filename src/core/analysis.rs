//! Contract with the external circuit analyzer (an LLM-backed service).
//!
//! The analyzer is opaque: it receives the canvas as canonical JSON plus an
//! optional description, and returns free text with an optional generated
//! circuit. Nothing here depends on the content of those strings.

use crate::core::errors::AnalyzerError;
use serde::{Deserialize, Serialize};

/// Request sent to the analyzer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_circuit_data: Option<String>,
}

/// Reply from the analyzer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub optimizations: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_circuit_json: Option<String>,
}

impl AnalysisResponse {
    /// Parse a raw reply body
    pub fn from_json(json: &str) -> Result<Self, AnalyzerError> {
        serde_json::from_str(json).map_err(|err| AnalyzerError::MalformedResponse(err.to_string()))
    }
}

/// The analyzer collaborator.
///
/// One request at a time: the workbench calls this through `&mut self`,
/// so a second request cannot start before the first has settled.
pub trait CircuitAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalyzerError>;
}

/// What happened to a generated circuit carried by a reply
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedCircuit {
    /// The reply carried no circuit
    Absent,
    /// The circuit passed validation and replaced the canvas
    Loaded,
    /// The circuit failed validation; the canvas was left untouched
    Rejected(String),
}

/// Text fields of a reply, kept verbatim for display, plus the load outcome
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub issues: Vec<String>,
    pub optimizations: Vec<String>,
    pub explanation: String,
    pub generated: GeneratedCircuit,
}
