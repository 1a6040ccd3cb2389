//! Accuracy evaluation entities
//!
//! Ground-truth labels and the comparison of pipeline output against them.

use serde::{Deserialize, Serialize};

use super::consistency::percentage;
use super::routing::Queue;
use super::ticket::{TicketId, TicketInput};
use super::triage::Category;

/// Curated expected output for one ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub expected_queue: Queue,
    pub expected_category: Category,
}

/// A ticket joined with its ground truth
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCase {
    pub ticket: TicketInput,
    pub truth: GroundTruth,
}

/// Outcome of scoring one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub ticket_id: TicketId,
    pub routing_match: bool,
    pub category_match: bool,
    pub expected_queue: Queue,
    pub predicted_queue: Queue,
    pub expected_category: Category,
    /// `None` when triage faulted and no category was produced
    pub predicted_category: Option<Category>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingMismatch {
    pub ticket_id: TicketId,
    pub expected: Queue,
    pub predicted: Queue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMismatch {
    pub ticket_id: TicketId,
    pub expected: Category,
    pub predicted: Option<Category>,
}

/// Aggregate accuracy over an evaluation set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub total_cases: usize,
    pub routing_correct: usize,
    pub category_correct: usize,
    /// Percentage, 0-100
    pub routing_accuracy: f64,
    /// Percentage, 0-100
    pub category_accuracy: f64,
    pub routing_mismatches: Vec<RoutingMismatch>,
    pub category_mismatches: Vec<CategoryMismatch>,
    pub results: Vec<CaseResult>,
}

impl AccuracyReport {
    pub fn from_results(results: Vec<CaseResult>) -> Self {
        let total_cases = results.len();
        let routing_correct = results.iter().filter(|r| r.routing_match).count();
        let category_correct = results.iter().filter(|r| r.category_match).count();

        let routing_mismatches = results
            .iter()
            .filter(|r| !r.routing_match)
            .map(|r| RoutingMismatch {
                ticket_id: r.ticket_id.clone(),
                expected: r.expected_queue,
                predicted: r.predicted_queue,
            })
            .collect();

        let category_mismatches = results
            .iter()
            .filter(|r| !r.category_match)
            .map(|r| CategoryMismatch {
                ticket_id: r.ticket_id.clone(),
                expected: r.expected_category,
                predicted: r.predicted_category,
            })
            .collect();

        Self {
            total_cases,
            routing_correct,
            category_correct,
            routing_accuracy: percentage(routing_correct, total_cases),
            category_accuracy: percentage(category_correct, total_cases),
            routing_mismatches,
            category_mismatches,
            results,
        }
    }
}
