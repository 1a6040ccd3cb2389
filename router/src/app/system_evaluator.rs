//! System evaluation
//!
//! Runs accuracy, pipeline consistency and triage consistency over a labeled
//! dataset and folds them into one health score.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::app::accuracy_evaluator::AccuracyEvaluator;
use crate::app::consistency_evaluator::ConsistencyEvaluator;
use crate::domain::entities::{percentage, HealthScore, LabeledCase, SystemEvaluation, TriageRecord};
use crate::domain::ports::{Classifier, TicketRouter};
use crate::error::EvaluationError;

pub struct SystemEvaluator<R, T>
where
    R: TicketRouter,
    T: Classifier<TriageRecord>,
{
    accuracy: AccuracyEvaluator<R>,
    consistency: ConsistencyEvaluator<R, T>,
    consistency_runs: usize,
    triage_runs: usize,
}

impl<R, T> SystemEvaluator<R, T>
where
    R: TicketRouter,
    T: Classifier<TriageRecord>,
{
    pub fn new(
        router: Arc<R>,
        triage: Arc<T>,
        consistency_runs: usize,
        triage_runs: usize,
    ) -> Self {
        Self {
            accuracy: AccuracyEvaluator::new(router.clone()),
            consistency: ConsistencyEvaluator::new(router, triage),
            consistency_runs,
            triage_runs,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.accuracy = self.accuracy.with_max_in_flight(max_in_flight);
        self.consistency = self.consistency.with_max_in_flight(max_in_flight);
        self
    }

    pub async fn evaluate(
        &self,
        cases: &[LabeledCase],
    ) -> Result<SystemEvaluation, EvaluationError> {
        if cases.is_empty() {
            return Err(EvaluationError::NoCases);
        }

        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, cases = cases.len(), "Starting system evaluation");

        let accuracy = self.accuracy.evaluate(cases).await;

        let mut consistency = Vec::with_capacity(cases.len());
        for case in cases {
            consistency.push(
                self.consistency
                    .evaluate(&case.ticket, self.consistency_runs)
                    .await?,
            );
        }

        let mut triage_consistency = Vec::with_capacity(cases.len());
        for case in cases {
            triage_consistency.push(
                self.consistency
                    .evaluate_triage(&case.ticket, self.triage_runs)
                    .await?,
            );
        }

        let total = cases.len();
        let consistency_rate = percentage(
            consistency.iter().filter(|r| r.is_fully_consistent()).count(),
            total,
        );
        let queue_consistency_rate =
            percentage(consistency.iter().filter(|r| r.queue_consistent).count(), total);
        let triage_consistency_rate = percentage(
            triage_consistency
                .iter()
                .filter(|r| r.is_fully_consistent())
                .count(),
            total,
        );
        let triage_category_consistency_rate = percentage(
            triage_consistency
                .iter()
                .filter(|r| r.category_consistent)
                .count(),
            total,
        );

        let health = HealthScore::compute(
            accuracy.routing_accuracy,
            accuracy.category_accuracy,
            consistency_rate,
        );

        tracing::info!(
            %run_id,
            routing_accuracy = accuracy.routing_accuracy,
            category_accuracy = accuracy.category_accuracy,
            consistency_rate,
            overall = health.overall,
            band = %health.band,
            "System evaluation complete"
        );

        Ok(SystemEvaluation {
            run_id,
            generated_at: Utc::now(),
            routing_accuracy: accuracy.routing_accuracy,
            category_accuracy: accuracy.category_accuracy,
            consistency_rate,
            queue_consistency_rate,
            triage_consistency_rate,
            triage_category_consistency_rate,
            health,
            accuracy,
            consistency,
            triage_consistency,
        })
    }
}
