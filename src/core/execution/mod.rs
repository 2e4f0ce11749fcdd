pub mod evaluator;
pub mod truth_table;

// Re-export commonly used types
pub use evaluator::{evaluate, EvaluationReport, Evaluator, Resolution};
pub use truth_table::{TruthTable, TruthTableRow, MAX_TABLE_INPUTS};
