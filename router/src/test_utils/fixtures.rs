//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::domain::entities::{
    BusinessImpact, Category, CustomerRisk, CustomerTier, GroundTruth, LabeledCase,
    PipelineOutcome, Priority, PriorityRecord, Queue, RoutingDecision, Sentiment, TicketId,
    TicketInput, TriageRecord, UrgencyScore,
};

/// Create a test ticket from an established enterprise customer
pub fn test_ticket() -> TicketInput {
    test_ticket_with_id("SUP-001")
}

/// Create a test ticket with a specific id
pub fn test_ticket_with_id(id: &str) -> TicketInput {
    TicketInput {
        ticket_id: TicketId::new(id),
        subject: "Dashboard not loading".to_string(),
        message: "Our analytics dashboard has been blank since this morning.".to_string(),
        customer_tier: CustomerTier::Enterprise,
        monthly_revenue: 2500.0,
        previous_tickets: 4,
        account_age_days: 365,
    }
}

/// Create a triage record; panics on an out-of-range urgency
pub fn test_triage(category: Category, urgency: u8, sentiment: Sentiment) -> TriageRecord {
    TriageRecord::new(category, UrgencyScore::new(urgency).unwrap(), sentiment)
}

pub fn test_priority(
    business_impact: BusinessImpact,
    customer_risk: CustomerRisk,
) -> PriorityRecord {
    PriorityRecord::new(business_impact, customer_risk)
}

/// Create a labeled case around `test_ticket_with_id`
pub fn labeled_case(id: &str, expected_queue: Queue, expected_category: Category) -> LabeledCase {
    LabeledCase {
        ticket: test_ticket_with_id(id),
        truth: GroundTruth {
            expected_queue,
            expected_category,
        },
    }
}

/// A successful pipeline outcome routed to `queue` with triage `category`
pub fn test_outcome(queue: Queue, category: Category) -> PipelineOutcome {
    PipelineOutcome {
        decision: RoutingDecision::new(queue, Priority::Medium, "test"),
        triage: Some(test_triage(category, 3, Sentiment::Neutral)),
        priority: Some(test_priority(BusinessImpact::Medium, CustomerRisk::Low)),
        fault: None,
    }
}

/// A fallback outcome where triage never completed
pub fn fallback_outcome(cause: &str) -> PipelineOutcome {
    PipelineOutcome {
        decision: RoutingDecision::fallback(cause),
        triage: None,
        priority: None,
        fault: Some(cause.to_string()),
    }
}
