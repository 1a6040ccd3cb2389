//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the classifiers.

pub mod accuracy_evaluator;
pub mod consistency_evaluator;
pub mod decision_engine;
pub mod input_formatter;
pub mod keyword_analysis;
pub mod pipeline;
pub mod system_evaluator;

pub use accuracy_evaluator::{label_cases, AccuracyEvaluator};
pub use consistency_evaluator::ConsistencyEvaluator;
pub use decision_engine::{DecisionEngine, DecisionTrace, RuleId};
pub use input_formatter::{format_prioritization_input, format_triage_input};
pub use keyword_analysis::{analyze_keywords, KeywordAnalysis};
pub use pipeline::{PipelineStage, RoutingPipeline};
pub use system_evaluator::SystemEvaluator;
