//! Consistency evaluator
//!
//! Re-runs the pipeline (or just the triage classifier) on the same ticket
//! and reports how much the output varies. Nothing is memoized: every run
//! hits the classifiers again, because variance is the thing being measured.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::app::input_formatter::format_triage_input;
use crate::domain::entities::{
    ConsistencyReport, EvaluationSample, TicketInput, TriageConsistencyReport, TriageRecord,
    TriageSample,
};
use crate::domain::ports::{Classifier, TicketRouter};
use crate::error::EvaluationError;

/// Default number of runs kept in flight at once
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

pub struct ConsistencyEvaluator<R, T>
where
    R: TicketRouter,
    T: Classifier<TriageRecord>,
{
    router: Arc<R>,
    triage: Arc<T>,
    max_in_flight: usize,
}

impl<R, T> ConsistencyEvaluator<R, T>
where
    R: TicketRouter,
    T: Classifier<TriageRecord>,
{
    pub fn new(router: Arc<R>, triage: Arc<T>) -> Self {
        Self {
            router,
            triage,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Run the full pipeline `runs` times on one ticket
    pub async fn evaluate(
        &self,
        ticket: &TicketInput,
        runs: usize,
    ) -> Result<ConsistencyReport, EvaluationError> {
        if runs == 0 {
            return Err(EvaluationError::InvalidRunCount(runs));
        }

        tracing::info!(ticket_id = %ticket.ticket_id, runs, "Testing pipeline consistency");

        let samples: Vec<EvaluationSample> = stream::iter(1..=runs)
            .map(|run| async move {
                let outcome = self.router.route(ticket).await;
                tracing::debug!(
                    ticket_id = %ticket.ticket_id,
                    run,
                    queue = %outcome.decision.recommended_queue,
                    priority = %outcome.decision.priority,
                    "Consistency run finished"
                );
                EvaluationSample {
                    run,
                    queue: outcome.decision.recommended_queue,
                    priority: outcome.decision.priority,
                    fallback: outcome.is_fallback(),
                }
            })
            .buffered(self.max_in_flight)
            .collect()
            .await;

        let report = ConsistencyReport::from_samples(ticket.ticket_id.clone(), samples)
            .ok_or(EvaluationError::InvalidRunCount(runs))?;

        if !report.is_fully_consistent() {
            tracing::warn!(
                ticket_id = %ticket.ticket_id,
                distinct_queues = report.queue_distribution.distinct(),
                distinct_priorities = report.priority_distribution.distinct(),
                "Inconsistent routing across runs"
            );
        }

        Ok(report)
    }

    /// Run only the triage classifier `runs` times on one ticket
    pub async fn evaluate_triage(
        &self,
        ticket: &TicketInput,
        runs: usize,
    ) -> Result<TriageConsistencyReport, EvaluationError> {
        if runs == 0 {
            return Err(EvaluationError::InvalidRunCount(runs));
        }

        tracing::info!(ticket_id = %ticket.ticket_id, runs, "Testing triage consistency");

        let prompt = format_triage_input(ticket);
        let prompt = prompt.as_str();

        let samples: Vec<TriageSample> = stream::iter(1..=runs)
            .map(|run| async move {
                let record = match self.triage.classify(prompt).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            ticket_id = %ticket.ticket_id,
                            run,
                            "Triage run failed: {}",
                            e
                        );
                        None
                    }
                };
                TriageSample { run, record }
            })
            .buffered(self.max_in_flight)
            .collect()
            .await;

        Ok(TriageConsistencyReport::from_samples(
            ticket.ticket_id.clone(),
            samples,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::RoutingPipeline;
    use crate::domain::entities::{
        BusinessImpact, Category, CustomerRisk, Priority, PriorityRecord, Queue, Sentiment,
    };
    use crate::test_utils::{
        test_priority, test_ticket, test_triage, FailingClassifier, ScriptedClassifier,
        StubClassifier,
    };

    fn evaluator<T, P>(
        triage: T,
        prioritization: P,
    ) -> ConsistencyEvaluator<RoutingPipeline<T, P>, T>
    where
        T: Classifier<TriageRecord>,
        P: Classifier<PriorityRecord>,
    {
        let pipeline = Arc::new(RoutingPipeline::new(
            Arc::new(triage),
            Arc::new(prioritization),
        ));
        let triage = pipeline.triage_classifier();
        ConsistencyEvaluator::new(pipeline, triage)
    }

    #[tokio::test]
    async fn fixed_classifiers_are_fully_consistent_for_any_run_count() {
        let service = evaluator(
            StubClassifier::new(test_triage(Category::BillingInquiry, 2, Sentiment::Neutral)),
            StubClassifier::new(test_priority(BusinessImpact::High, CustomerRisk::Low)),
        );

        for runs in [1, 2, 5, 9] {
            let report = service.evaluate(&test_ticket(), runs).await.unwrap();

            assert_eq!(report.runs, runs);
            assert!(report.queue_consistent);
            assert!(report.priority_consistent);
            assert!(report.is_fully_consistent());
            assert_eq!(report.queue_distribution.distinct(), 1);
            assert_eq!(report.queue_distribution.entries()[0].count, runs);
            assert_eq!(report.queue_distribution.entries()[0].percentage, 100.0);
            assert_eq!(report.most_common_queue, Queue::Sales);
            assert_eq!(report.most_common_priority, Priority::High);
        }
    }

    #[tokio::test]
    async fn varying_triage_is_reported_not_suppressed() {
        let triage = ScriptedClassifier::sequence(vec![
            Ok(test_triage(Category::Bug, 5, Sentiment::Frustrated)),
            Ok(test_triage(Category::GeneralQuestion, 1, Sentiment::Neutral)),
            Ok(test_triage(Category::Bug, 5, Sentiment::Frustrated)),
        ]);
        let service = evaluator(
            triage,
            StubClassifier::new(test_priority(BusinessImpact::High, CustomerRisk::Low)),
        );

        let report = service.evaluate(&test_ticket(), 3).await.unwrap();

        assert!(!report.queue_consistent);
        assert_eq!(report.queue_distribution.distinct(), 2);
        assert_eq!(report.queue_distribution.count_of(&Queue::Tier3Engineering), 2);
        assert_eq!(report.queue_distribution.count_of(&Queue::Tier1Support), 1);
        assert_eq!(report.most_common_queue, Queue::Tier3Engineering);
        assert_eq!(report.samples.len(), 3);
    }

    #[tokio::test]
    async fn every_run_calls_the_classifier_again() {
        let triage =
            ScriptedClassifier::repeating(test_triage(Category::Bug, 2, Sentiment::Neutral));
        let prompts = triage.prompts();
        let service = evaluator(
            triage,
            StubClassifier::new(test_priority(BusinessImpact::Low, CustomerRisk::Low)),
        );

        service.evaluate(&test_ticket(), 4).await.unwrap();

        assert_eq!(prompts.read().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn fallback_runs_are_counted() {
        let service = evaluator(
            FailingClassifier::new("timeout"),
            StubClassifier::new(test_priority(BusinessImpact::Low, CustomerRisk::Low)),
        );

        let report = service.evaluate(&test_ticket(), 3).await.unwrap();

        assert_eq!(report.fallback_runs, 3);
        assert!(report.is_fully_consistent());
        assert_eq!(report.most_common_queue, Queue::Tier1Support);
    }

    #[tokio::test]
    async fn zero_runs_is_rejected() {
        let service = evaluator(
            StubClassifier::new(test_triage(Category::Bug, 2, Sentiment::Neutral)),
            StubClassifier::new(test_priority(BusinessImpact::Low, CustomerRisk::Low)),
        );

        let result = service.evaluate(&test_ticket(), 0).await;
        assert!(matches!(result, Err(EvaluationError::InvalidRunCount(0))));

        let result = service.evaluate_triage(&test_ticket(), 0).await;
        assert!(matches!(result, Err(EvaluationError::InvalidRunCount(0))));
    }

    #[tokio::test]
    async fn triage_mode_only_calls_triage_classifier() {
        let prioritization =
            ScriptedClassifier::repeating(test_priority(BusinessImpact::Low, CustomerRisk::Low));
        let priority_prompts = prioritization.prompts();
        let service = evaluator(
            StubClassifier::new(test_triage(Category::FeatureRequest, 2, Sentiment::Positive)),
            prioritization,
        );

        let report = service.evaluate_triage(&test_ticket(), 3).await.unwrap();

        assert_eq!(report.runs, 3);
        assert_eq!(report.failures, 0);
        assert!(report.is_fully_consistent());
        assert_eq!(
            report.category_distribution.mode(),
            Some(&Category::FeatureRequest)
        );
        assert!(priority_prompts.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn triage_mode_reports_urgency_drift_and_failures() {
        let triage = ScriptedClassifier::sequence(vec![
            Ok(test_triage(Category::Bug, 3, Sentiment::Negative)),
            Ok(test_triage(Category::Bug, 4, Sentiment::Negative)),
            Err("invalid json".to_string()),
        ]);
        let service = evaluator(
            triage,
            StubClassifier::new(test_priority(BusinessImpact::Low, CustomerRisk::Low)),
        );

        let report = service.evaluate_triage(&test_ticket(), 3).await.unwrap();

        assert_eq!(report.failures, 1);
        assert!(report.category_consistent);
        assert!(!report.urgency_consistent);
        assert!(report.sentiment_consistent);
        assert!(!report.is_fully_consistent());
    }
}
