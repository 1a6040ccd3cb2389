//! Routing pipeline
//!
//! Sequences the two classifiers and the decision engine. Prioritization
//! depends on triage's sentiment, so the two classifier calls are strictly
//! sequential within one run. Any classifier fault is absorbed into the
//! fallback decision; callers always get a valid `RoutingDecision`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::decision_engine::DecisionEngine;
use crate::app::input_formatter::{format_prioritization_input, format_triage_input};
use crate::domain::entities::{
    PipelineOutcome, PriorityRecord, RoutingDecision, TicketInput, TriageRecord,
};
use crate::domain::ports::{Classifier, TicketRouter};
use crate::error::ClassifierError;

/// Stage of the pipeline a fault came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Triage,
    Prioritization,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Triage => write!(f, "triage"),
            PipelineStage::Prioritization => write!(f, "prioritization"),
        }
    }
}

/// Triage → prioritization → decision, with a fail-safe fallback
pub struct RoutingPipeline<T, P>
where
    T: Classifier<TriageRecord>,
    P: Classifier<PriorityRecord>,
{
    triage: Arc<T>,
    prioritization: Arc<P>,
    engine: DecisionEngine,
}

impl<T, P> RoutingPipeline<T, P>
where
    T: Classifier<TriageRecord>,
    P: Classifier<PriorityRecord>,
{
    pub fn new(triage: Arc<T>, prioritization: Arc<P>) -> Self {
        Self {
            triage,
            prioritization,
            engine: DecisionEngine::new(),
        }
    }

    /// The triage classifier, for triage-only evaluation
    pub fn triage_classifier(&self) -> Arc<T> {
        self.triage.clone()
    }

    /// Route a ticket, returning only the final decision
    pub async fn run(&self, ticket: &TicketInput) -> RoutingDecision {
        self.run_detailed(ticket).await.decision
    }

    /// Route a ticket, keeping whichever intermediate records were produced
    pub async fn run_detailed(&self, ticket: &TicketInput) -> PipelineOutcome {
        tracing::info!(ticket_id = %ticket.ticket_id, "Starting analysis");

        let triage_prompt = format_triage_input(ticket);
        let triage = match self.triage.classify(&triage_prompt).await {
            Ok(record) => record,
            Err(e) => return fallback(ticket, PipelineStage::Triage, e, None),
        };
        tracing::debug!(
            ticket_id = %ticket.ticket_id,
            category = %triage.category,
            urgency = %triage.urgency_score,
            sentiment = %triage.sentiment,
            "Triage complete"
        );

        let priority_prompt = format_prioritization_input(ticket, triage.sentiment);
        let priority = match self.prioritization.classify(&priority_prompt).await {
            Ok(record) => record,
            Err(e) => return fallback(ticket, PipelineStage::Prioritization, e, Some(triage)),
        };
        tracing::debug!(
            ticket_id = %ticket.ticket_id,
            business_impact = %priority.business_impact,
            customer_risk = %priority.customer_risk,
            "Prioritization complete"
        );

        let decision = self.engine.decide(&triage, &priority);
        tracing::info!(
            ticket_id = %ticket.ticket_id,
            queue = %decision.recommended_queue,
            priority = %decision.priority,
            "Analysis complete"
        );

        PipelineOutcome {
            decision,
            triage: Some(triage),
            priority: Some(priority),
            fault: None,
        }
    }
}

fn fallback(
    ticket: &TicketInput,
    stage: PipelineStage,
    error: ClassifierError,
    triage: Option<TriageRecord>,
) -> PipelineOutcome {
    let cause = format!("{} classifier failed: {}", stage, error);
    tracing::warn!(ticket_id = %ticket.ticket_id, "Falling back to default routing: {}", cause);

    PipelineOutcome {
        decision: RoutingDecision::fallback(&cause),
        triage,
        priority: None,
        fault: Some(cause),
    }
}

#[async_trait]
impl<T, P> TicketRouter for RoutingPipeline<T, P>
where
    T: Classifier<TriageRecord>,
    P: Classifier<PriorityRecord>,
{
    async fn route(&self, ticket: &TicketInput) -> PipelineOutcome {
        self.run_detailed(ticket).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        BusinessImpact, Category, CustomerRisk, Priority, Queue, Sentiment,
    };
    use crate::test_utils::{
        test_priority, test_ticket, test_triage, FailingClassifier, ScriptedClassifier,
        StubClassifier,
    };

    fn pipeline<T, P>(triage: T, prioritization: P) -> RoutingPipeline<T, P>
    where
        T: Classifier<TriageRecord>,
        P: Classifier<PriorityRecord>,
    {
        RoutingPipeline::new(Arc::new(triage), Arc::new(prioritization))
    }

    #[tokio::test]
    async fn run_applies_decision_table_to_classifier_output() {
        let service = pipeline(
            StubClassifier::new(test_triage(Category::Bug, 5, Sentiment::Frustrated)),
            StubClassifier::new(test_priority(BusinessImpact::High, CustomerRisk::High)),
        );

        let decision = service.run(&test_ticket()).await;

        assert_eq!(decision.recommended_queue, Queue::Tier3Engineering);
        assert_eq!(decision.priority, Priority::Critical);
    }

    #[tokio::test]
    async fn run_detailed_keeps_intermediate_records() {
        let triage = test_triage(Category::FeatureRequest, 2, Sentiment::Positive);
        let priority = test_priority(BusinessImpact::Medium, CustomerRisk::Low);
        let service = pipeline(StubClassifier::new(triage), StubClassifier::new(priority));

        let outcome = service.run_detailed(&test_ticket()).await;

        assert_eq!(outcome.triage, Some(triage));
        assert_eq!(outcome.priority, Some(priority));
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.decision.recommended_queue, Queue::ProductFeedback);
    }

    #[tokio::test]
    async fn prioritization_prompt_carries_triage_sentiment() {
        let prioritization =
            ScriptedClassifier::repeating(test_priority(BusinessImpact::Low, CustomerRisk::Low));
        let prompts = prioritization.prompts();
        let service = pipeline(
            StubClassifier::new(test_triage(Category::GeneralQuestion, 1, Sentiment::Negative)),
            prioritization,
        );

        service.run(&test_ticket()).await;

        let seen = prompts.read().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("Current Sentiment: Negative"));
    }

    #[tokio::test]
    async fn triage_fault_falls_back_without_calling_prioritization() {
        let prioritization =
            ScriptedClassifier::repeating(test_priority(BusinessImpact::High, CustomerRisk::Low));
        let prompts = prioritization.prompts();
        let service = pipeline(FailingClassifier::new("model overloaded"), prioritization);

        let outcome = service.run_detailed(&test_ticket()).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.triage, None);
        assert_eq!(outcome.decision.recommended_queue, Queue::Tier1Support);
        assert_eq!(outcome.decision.priority, Priority::Medium);
        assert!(outcome.decision.reasoning.contains("model overloaded"));
        assert!(outcome.decision.reasoning.contains("503"));
        assert!(outcome.decision.reasoning.contains("triage"));
        assert!(prompts.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn prioritization_fault_keeps_triage_record() {
        let triage = test_triage(Category::Bug, 3, Sentiment::Neutral);
        let service = pipeline(
            StubClassifier::new(triage),
            FailingClassifier::new("urgency_score must be between 1 and 5"),
        );

        let outcome = service.run_detailed(&test_ticket()).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.triage, Some(triage));
        assert_eq!(outcome.priority, None);
        assert!(outcome
            .fault
            .as_deref()
            .unwrap()
            .starts_with("prioritization classifier failed"));
    }

    #[tokio::test]
    async fn always_failing_boundary_yields_identical_fallback_for_any_ticket() {
        let service = pipeline(
            FailingClassifier::new("connection refused"),
            FailingClassifier::new("connection refused"),
        );

        let mut other = test_ticket();
        other.ticket_id = "SUP-999".into();
        other.subject = "Different".to_string();

        let first = service.run(&test_ticket()).await;
        let second = service.run(&other).await;

        assert_eq!(first, second);
        assert_eq!(first.recommended_queue, Queue::Tier1Support);
        assert_eq!(first.priority, Priority::Medium);
        assert!(first.reasoning.contains("connection refused"));
    }

    #[tokio::test]
    async fn router_port_delegates_to_run_detailed() {
        let service = pipeline(
            StubClassifier::new(test_triage(Category::SecurityConcern, 1, Sentiment::Neutral)),
            StubClassifier::new(test_priority(BusinessImpact::Low, CustomerRisk::Low)),
        );

        let outcome = TicketRouter::route(&service, &test_ticket()).await;

        assert_eq!(
            outcome.decision.recommended_queue,
            Queue::SecurityResponseTeam
        );
    }
}
