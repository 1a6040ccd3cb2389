//! Router port
//!
//! Seam between the evaluators and whatever produces routing outcomes.

use async_trait::async_trait;

use crate::domain::entities::{PipelineOutcome, TicketInput};

/// Resolves a ticket to a routing outcome
///
/// Infallible by contract: faults are absorbed into a fallback decision.
#[async_trait]
pub trait TicketRouter: Send + Sync {
    async fn route(&self, ticket: &TicketInput) -> PipelineOutcome;
}
