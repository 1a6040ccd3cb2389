//! Domain entities
//!
//! Immutable value records exchanged between pipeline stages, plus the
//! reports the evaluators derive from them.

pub mod accuracy;
pub mod consistency;
pub mod health;
pub mod priority;
pub mod routing;
pub mod ticket;
pub mod triage;

pub use accuracy::{
    AccuracyReport, CaseResult, CategoryMismatch, GroundTruth, LabeledCase, RoutingMismatch,
};
pub use consistency::{
    percentage, ConsistencyReport, Distribution, DistributionEntry, EvaluationSample,
    TriageConsistencyReport, TriageSample,
};
pub use health::{HealthBand, HealthScore, SystemEvaluation};
pub use priority::{BusinessImpact, CustomerRisk, PriorityRecord};
pub use routing::{PipelineOutcome, Priority, Queue, RoutingDecision};
pub use ticket::{CustomerTier, TicketId, TicketInput};
pub use triage::{Category, Sentiment, TriageRecord, UrgencyScore};
