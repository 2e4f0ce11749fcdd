use crate::core::analysis::{AnalysisOutcome, AnalysisRequest, CircuitAnalyzer, GeneratedCircuit};
use crate::core::circuit::Circuit;
use crate::core::components::types::ComponentKind;
use crate::core::config::WorkbenchConfig;
use crate::core::connections::Connection;
use crate::core::edit::DeletedComponent;
use crate::core::errors::{AnalyzerError, Result, StoreError};
use crate::core::execution::evaluator::{evaluate, EvaluationReport};
use crate::core::execution::truth_table::TruthTable;
use crate::core::persistence::{CircuitStore, SavedCircuit};
use crate::core::serialization::CircuitDocument;
use crate::core::types::{Bit, ComponentId, ConnectionId, InputPort, OutputPort, Position};
use log::{info, warn};
use rand::Rng;

/// The circuit-builder session: owns the current circuit and everything
/// the user sees around it.
///
/// Front ends hold one `Workbench` and re-render after each call. There is
/// no global state; every operation takes the workbench explicitly.
pub struct Workbench {
    circuit: Circuit,
    description: String,
    analysis: Option<AnalysisOutcome>,
    config: WorkbenchConfig,
}

impl Workbench {
    pub fn new(config: WorkbenchConfig) -> Self {
        Self {
            circuit: Circuit::with_id_strategy(config.id_strategy),
            description: String::new(),
            analysis: None,
            config,
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Result of the last successful analysis, if any
    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }

    /// Add a component; without a position it is dropped at a random
    /// spot inside the configured placement area
    pub fn add_component(&mut self, kind: ComponentKind, position: Option<Position>) -> ComponentId {
        let position = position.unwrap_or_else(|| self.random_position());
        self.circuit.add_component(kind, position, None)
    }

    fn random_position(&self) -> Position {
        let area = self.config.placement;
        let mut rng = rand::thread_rng();
        Position::new(
            area.x + rng.gen::<f64>() * area.width,
            area.y + rng.gen::<f64>() * area.height,
        )
    }

    pub fn connect(&mut self, source: OutputPort, target: InputPort) -> Result<ConnectionId> {
        self.circuit.connect(source, target)
    }

    pub fn disconnect(&mut self, id: &ConnectionId) -> Result<Connection> {
        self.circuit.disconnect(id)
    }

    pub fn delete_component(&mut self, id: &ComponentId) -> Result<DeletedComponent> {
        self.circuit.delete_component(id)
    }

    pub fn set_input_value(&mut self, id: &ComponentId, bit: Bit) -> Result<()> {
        self.circuit.set_input_value(id, bit)
    }

    pub fn toggle_input(&mut self, id: &ComponentId) -> Result<Bit> {
        self.circuit.toggle_input(id)
    }

    pub fn move_component(&mut self, id: &ComponentId, position: Position) -> Result<()> {
        self.circuit.move_component(id, position)
    }

    /// Evaluate the circuit and write results onto its OUTPUTs
    pub fn run_simulation(&mut self) -> EvaluationReport {
        evaluate(&mut self.circuit)
    }

    pub fn truth_table(&self) -> Result<TruthTable> {
        TruthTable::for_circuit(&self.circuit)
    }

    /// Replace the circuit with a validated document; atomic
    pub fn load_circuit(&mut self, document: &CircuitDocument) -> Result<()> {
        self.circuit.load_circuit(document)
    }

    /// Empty the canvas, the description and the last analysis
    pub fn clear(&mut self) {
        self.circuit.clear();
        self.description.clear();
        self.analysis = None;
    }

    /// Write the circuit and description to the configured slot
    pub fn save(&self, store: &mut dyn CircuitStore) -> std::result::Result<(), StoreError> {
        let saved = SavedCircuit {
            circuit: self.circuit.to_document(),
            circuit_description: Some(self.description.clone()).filter(|d| !d.is_empty()),
        };
        store.save(&self.config.storage_slot, &saved.to_json()?)?;
        info!("Saved circuit to slot '{}'", self.config.storage_slot);
        Ok(())
    }

    /// Restore the circuit and description from the configured slot.
    ///
    /// Returns `false` when the slot is empty. A stored circuit that fails
    /// validation is reported and nothing changes.
    pub fn load(&mut self, store: &dyn CircuitStore) -> std::result::Result<bool, StoreError> {
        let Some(json) = store.load(&self.config.storage_slot)? else {
            info!("No saved circuit in slot '{}'", self.config.storage_slot);
            return Ok(false);
        };
        let saved = SavedCircuit::from_json(&json)?;
        self.circuit.load_circuit(&saved.circuit)?;
        self.description = saved.circuit_description.unwrap_or_default();
        self.analysis = None;
        Ok(true)
    }

    /// Send the canvas and description to the analyzer.
    ///
    /// A generated circuit replaces the canvas only if it passes the same
    /// validation as any other load; otherwise the canvas is untouched and
    /// the rejection is recorded in the outcome. Analyzer failures leave
    /// everything as it was, except that any previous analysis is dropped.
    pub fn analyze(
        &mut self,
        analyzer: &dyn CircuitAnalyzer,
    ) -> std::result::Result<&AnalysisOutcome, AnalyzerError> {
        let description = self.description.trim();
        if self.circuit.is_empty() && description.is_empty() {
            return Err(AnalyzerError::NothingToAnalyze);
        }

        let request = AnalysisRequest {
            circuit_description: Some(description.to_string()).filter(|d| !d.is_empty()),
            canvas_circuit_data: Some(self.circuit.to_json()?),
        };
        self.analysis = None;

        let response = analyzer.analyze(&request).map_err(|err| {
            warn!("Circuit analysis failed: {}", err);
            err
        })?;

        let generated = match response.generated_circuit_json.as_deref() {
            None => GeneratedCircuit::Absent,
            Some(json) => match self.circuit.load_json(json) {
                Ok(()) => GeneratedCircuit::Loaded,
                Err(err) => GeneratedCircuit::Rejected(err.to_string()),
            },
        };

        let outcome = self.analysis.insert(AnalysisOutcome {
            issues: response.issues,
            optimizations: response.optimizations,
            explanation: response.explanation,
            generated,
        });
        Ok(&*outcome)
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(WorkbenchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::AnalysisResponse;
    use crate::core::config::IdStrategy;
    use crate::core::persistence::MemoryStore;
    use std::cell::RefCell;

    /// Analyzer that records requests and replays a canned reply
    struct ScriptedAnalyzer {
        reply: std::result::Result<AnalysisResponse, String>,
        requests: RefCell<Vec<AnalysisRequest>>,
    }

    impl ScriptedAnalyzer {
        fn replying(reply: AnalysisResponse) -> Self {
            Self {
                reply: Ok(reply),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl CircuitAnalyzer for ScriptedAnalyzer {
        fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> std::result::Result<AnalysisResponse, AnalyzerError> {
            self.requests.borrow_mut().push(request.clone());
            self.reply.clone().map_err(AnalyzerError::Transport)
        }
    }

    fn sequential() -> Workbench {
        Workbench::new(WorkbenchConfig::new().with_id_strategy(IdStrategy::Sequential))
    }

    fn not_gate_bench() -> (Workbench, ComponentId, ComponentId) {
        let mut bench = sequential();
        let a = bench.add_component(ComponentKind::Input, Some(Position::new(0.0, 0.0)));
        let not = bench.add_component(ComponentKind::Not, Some(Position::new(50.0, 0.0)));
        let out = bench.add_component(ComponentKind::Output, Some(Position::new(100.0, 0.0)));
        bench.connect(a.output("out"), not.input("in1")).unwrap();
        bench.connect(not.output("out"), out.input("in")).unwrap();
        (bench, a, out)
    }

    #[test]
    fn test_random_placement_stays_inside_area() {
        let mut bench = sequential();
        let area = bench.config().placement;
        for _ in 0..50 {
            let id = bench.add_component(ComponentKind::And, None);
            let pos = bench.circuit().get_component(&id).unwrap().position();
            assert!(pos.x >= area.x && pos.x <= area.x + area.width);
            assert!(pos.y >= area.y && pos.y <= area.y + area.height);
        }
    }

    #[test]
    fn test_run_simulation_writes_outputs() {
        let (mut bench, a, out) = not_gate_bench();
        bench.run_simulation();
        assert_eq!(bench.circuit().get_component(&out).unwrap().value(), Some(Bit::One));

        bench.toggle_input(&a).unwrap();
        // stale until the next run
        assert_eq!(bench.circuit().get_component(&out).unwrap().value(), Some(Bit::One));
        bench.run_simulation();
        assert_eq!(bench.circuit().get_component(&out).unwrap().value(), Some(Bit::Zero));
    }

    #[test]
    fn test_save_and_load_restore_circuit_and_description() {
        let (mut bench, _, _) = not_gate_bench();
        bench.set_description("an inverter");
        let mut store = MemoryStore::new();
        bench.save(&mut store).unwrap();

        let mut restored = sequential();
        assert!(restored.load(&store).unwrap());
        assert_eq!(restored.description(), "an inverter");
        assert_eq!(restored.circuit().to_json().unwrap(), bench.circuit().to_json().unwrap());
    }

    #[test]
    fn test_load_from_empty_slot_changes_nothing() {
        let (mut bench, _, _) = not_gate_bench();
        let store = MemoryStore::new();
        assert!(!bench.load(&store).unwrap());
        assert_eq!(bench.circuit().component_count(), 3);
    }

    #[test]
    fn test_load_of_invalid_slot_keeps_state() {
        let (mut bench, _, _) = not_gate_bench();
        bench.set_description("keep me");
        let mut store = MemoryStore::new();
        store
            .save(
                &bench.config().storage_slot.clone(),
                r#"{"components":[],"connections":[{"id":"c","sourceId":"x","sourcePort":"out","targetId":"y","targetPort":"in"}]}"#,
            )
            .unwrap();

        let err = bench.load(&store).unwrap_err();
        assert!(matches!(err, StoreError::Circuit(_)));
        assert_eq!(bench.circuit().component_count(), 3);
        assert_eq!(bench.description(), "keep me");
    }

    #[test]
    fn test_clear_resets_everything() {
        let (mut bench, _, _) = not_gate_bench();
        bench.set_description("x");
        let analyzer = ScriptedAnalyzer::replying(AnalysisResponse::default());
        bench.analyze(&analyzer).unwrap();

        bench.clear();
        assert!(bench.circuit().is_empty());
        assert_eq!(bench.description(), "");
        assert!(bench.analysis().is_none());
    }

    #[test]
    fn test_analyze_rejects_empty_request() {
        let mut bench = sequential();
        bench.set_description("   ");
        let analyzer = ScriptedAnalyzer::replying(AnalysisResponse::default());
        assert!(matches!(
            bench.analyze(&analyzer),
            Err(AnalyzerError::NothingToAnalyze)
        ));
        assert!(analyzer.requests.borrow().is_empty());
    }

    #[test]
    fn test_analyze_sends_empty_form_and_trimmed_description() {
        let mut bench = sequential();
        bench.set_description("  build a half adder \n");
        let analyzer = ScriptedAnalyzer::replying(AnalysisResponse::default());
        bench.analyze(&analyzer).unwrap();

        let requests = analyzer.requests.borrow();
        assert_eq!(
            requests[0].canvas_circuit_data.as_deref(),
            Some(r#"{"components":[],"connections":[]}"#)
        );
        assert_eq!(
            requests[0].circuit_description.as_deref(),
            Some("build a half adder")
        );
    }

    #[test]
    fn test_analyze_loads_valid_generated_circuit() {
        let mut bench = sequential();
        bench.set_description("one output");
        let analyzer = ScriptedAnalyzer::replying(AnalysisResponse {
            issues: vec![],
            optimizations: vec![],
            explanation: "A lone output.".to_string(),
            generated_circuit_json: Some(
                r#"{"components":[{"id":"o","type":"OUTPUT","x":1,"y":2}],"connections":[]}"#
                    .to_string(),
            ),
        });

        let outcome = bench.analyze(&analyzer).unwrap();
        assert_eq!(outcome.generated, GeneratedCircuit::Loaded);
        assert_eq!(outcome.explanation, "A lone output.");
        assert!(bench.circuit().has_component(&ComponentId::from("o")));
    }

    #[test]
    fn test_analyze_rejects_invalid_generated_circuit() {
        let (mut bench, _, _) = not_gate_bench();
        let before = bench.circuit().to_json().unwrap();
        let analyzer = ScriptedAnalyzer::replying(AnalysisResponse {
            issues: vec!["none".to_string()],
            optimizations: vec![],
            explanation: String::new(),
            generated_circuit_json: Some(r#"{"components":[{"id":"g","type":"XNOR"#.to_string()),
        });

        let outcome = bench.analyze(&analyzer).unwrap();
        assert!(matches!(outcome.generated, GeneratedCircuit::Rejected(_)));
        assert_eq!(outcome.issues, vec!["none"]);
        assert_eq!(bench.circuit().to_json().unwrap(), before);
    }

    #[test]
    fn test_analyzer_failure_leaves_canvas() {
        let (mut bench, _, _) = not_gate_bench();
        let before = bench.circuit().to_json().unwrap();
        let analyzer = ScriptedAnalyzer::failing("connection refused");

        let err = bench.analyze(&analyzer).unwrap_err();
        assert!(matches!(err, AnalyzerError::Transport(_)));
        assert!(bench.analysis().is_none());
        assert_eq!(bench.circuit().to_json().unwrap(), before);
    }
}
