//! Accuracy evaluator
//!
//! Runs the pipeline once per labeled case and scores the routed queue and
//! the intermediate triage category against ground truth.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::app::consistency_evaluator::DEFAULT_MAX_IN_FLIGHT;
use crate::domain::entities::{
    AccuracyReport, CaseResult, GroundTruth, LabeledCase, PipelineOutcome, TicketId, TicketInput,
};
use crate::domain::ports::TicketRouter;
use crate::error::EvaluationError;

/// Join tickets with their ground truth, preserving ticket order
///
/// A ticket without a ground-truth entry is a caller error and fails the
/// whole join rather than being skipped.
pub fn label_cases(
    tickets: Vec<TicketInput>,
    ground_truth: &HashMap<TicketId, GroundTruth>,
) -> Result<Vec<LabeledCase>, EvaluationError> {
    tickets
        .into_iter()
        .map(|ticket| match ground_truth.get(&ticket.ticket_id) {
            Some(truth) => Ok(LabeledCase {
                ticket,
                truth: *truth,
            }),
            None => Err(EvaluationError::MissingGroundTruth(ticket.ticket_id)),
        })
        .collect()
}

pub struct AccuracyEvaluator<R>
where
    R: TicketRouter,
{
    router: Arc<R>,
    max_in_flight: usize,
}

impl<R> AccuracyEvaluator<R>
where
    R: TicketRouter,
{
    pub fn new(router: Arc<R>) -> Self {
        Self {
            router,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Route every case once and compare against its labels
    pub async fn evaluate(&self, cases: &[LabeledCase]) -> AccuracyReport {
        tracing::info!(cases = cases.len(), "Running accuracy evaluation");

        let results: Vec<CaseResult> = stream::iter(cases)
            .map(|case| async move {
                let outcome = self.router.route(&case.ticket).await;
                score(case, outcome)
            })
            .buffered(self.max_in_flight)
            .collect()
            .await;

        for result in &results {
            if !result.routing_match {
                tracing::info!(
                    ticket_id = %result.ticket_id,
                    expected = %result.expected_queue,
                    predicted = %result.predicted_queue,
                    "Routing mismatch"
                );
            }
        }

        let report = AccuracyReport::from_results(results);
        tracing::info!(
            routing_accuracy = report.routing_accuracy,
            category_accuracy = report.category_accuracy,
            "Accuracy evaluation complete"
        );
        report
    }
}

fn score(case: &LabeledCase, outcome: PipelineOutcome) -> CaseResult {
    let predicted_queue = outcome.decision.recommended_queue;
    let predicted_category = outcome.triage.map(|triage| triage.category);

    CaseResult {
        ticket_id: case.ticket.ticket_id.clone(),
        routing_match: predicted_queue == case.truth.expected_queue,
        category_match: predicted_category == Some(case.truth.expected_category),
        expected_queue: case.truth.expected_queue,
        predicted_queue,
        expected_category: case.truth.expected_category,
        predicted_category,
        reasoning: outcome.decision.reasoning,
    }
}
