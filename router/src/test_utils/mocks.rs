//! Mock implementations of port traits
//!
//! In-memory classifiers and routers that can be configured for testing.
//! They record what they were asked so tests can verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{PipelineOutcome, RoutingDecision, TicketId, TicketInput};
use crate::domain::ports::{Classifier, TicketRouter};
use crate::error::ClassifierError;

// ============================================================================
// Stub Classifier
// ============================================================================

/// Always returns the same record
pub struct StubClassifier<R> {
    record: R,
}

impl<R> StubClassifier<R> {
    pub fn new(record: R) -> Self {
        Self { record }
    }
}

#[async_trait]
impl<R> Classifier<R> for StubClassifier<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn classify(&self, _prompt: &str) -> Result<R, ClassifierError> {
        Ok(self.record.clone())
    }
}

// ============================================================================
// Scripted Classifier
// ============================================================================

/// Replays a script of responses, cycling when it runs out
///
/// `Err` entries surface as `ClassifierError::Malformed`. Every prompt is
/// recorded in call order.
pub struct ScriptedClassifier<R> {
    script: Vec<Result<R, String>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl<R> ScriptedClassifier<R> {
    pub fn sequence(script: Vec<Result<R, String>>) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        Self {
            script,
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn repeating(record: R) -> Self {
        Self::sequence(vec![Ok(record)])
    }

    /// Handle to the recorded prompts
    pub fn prompts(&self) -> Arc<RwLock<Vec<String>>> {
        self.prompts.clone()
    }
}

#[async_trait]
impl<R> Classifier<R> for ScriptedClassifier<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn classify(&self, prompt: &str) -> Result<R, ClassifierError> {
        let call = {
            let mut prompts = self.prompts.write().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };

        match &self.script[call % self.script.len()] {
            Ok(record) => Ok(record.clone()),
            Err(message) => Err(ClassifierError::Malformed(message.clone())),
        }
    }
}

// ============================================================================
// Failing Classifier
// ============================================================================

/// Fails every call, for any record type
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl<R> Classifier<R> for FailingClassifier
where
    R: Send + 'static,
{
    async fn classify(&self, _prompt: &str) -> Result<R, ClassifierError> {
        Err(ClassifierError::Api {
            status: 503,
            message: self.message.clone(),
        })
    }
}

// ============================================================================
// Stub Router
// ============================================================================

/// Returns canned outcomes keyed by ticket id
///
/// Unknown tickets get the fallback decision.
#[derive(Default)]
pub struct StubRouter {
    outcomes: HashMap<TicketId, PipelineOutcome>,
    calls: Arc<RwLock<Vec<TicketId>>>,
}

impl StubRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, id: &str, outcome: PipelineOutcome) -> Self {
        self.outcomes.insert(TicketId::from(id), outcome);
        self
    }

    /// Handle to the ticket ids routed so far
    pub fn calls(&self) -> Arc<RwLock<Vec<TicketId>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl TicketRouter for StubRouter {
    async fn route(&self, ticket: &TicketInput) -> PipelineOutcome {
        self.calls.write().unwrap().push(ticket.ticket_id.clone());

        match self.outcomes.get(&ticket.ticket_id) {
            Some(outcome) => outcome.clone(),
            None => {
                let cause = format!("no stubbed outcome for {}", ticket.ticket_id);
                PipelineOutcome {
                    decision: RoutingDecision::fallback(&cause),
                    triage: None,
                    priority: None,
                    fault: Some(cause),
                }
            }
        }
    }
}
