//! Prompt formatting for the classifiers
//!
//! Pure functions: the same ticket always yields byte-identical prompt text,
//! so any variance across runs comes from the classifiers alone.

use crate::domain::entities::{Sentiment, TicketInput};

/// Prompt for the triage classifier (ticket content only)
pub fn format_triage_input(ticket: &TicketInput) -> String {
    format!(
        "TICKET ANALYSIS REQUEST\n\
         \n\
         Subject: {}\n\
         \n\
         Message: {}\n\
         \n\
         Please analyze this ticket and classify it according to the rules provided. \
         Be consistent and accurate.",
        ticket.subject.trim(),
        ticket.message.trim()
    )
}

/// Prompt for the prioritization classifier (account metadata plus current sentiment)
pub fn format_prioritization_input(ticket: &TicketInput, sentiment: Sentiment) -> String {
    format!(
        "CUSTOMER BUSINESS VALUE ANALYSIS\n\
         \n\
         Customer Tier: {}\n\
         Monthly Revenue: {}\n\
         Previous Tickets: {}\n\
         Account Age Days: {}\n\
         Current Sentiment: {}\n\
         \n\
         Apply the business impact and customer risk rules exactly as specified.",
        ticket.customer_tier,
        ticket.monthly_revenue,
        ticket.previous_tickets,
        ticket.account_age_days,
        sentiment
    )
}
