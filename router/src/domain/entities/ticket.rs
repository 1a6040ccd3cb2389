//! Ticket domain entity
//!
//! An incoming support ticket together with the customer account metadata the
//! prioritization stage needs.

use serde::{Deserialize, Serialize};

/// Unique identifier for a ticket (e.g. `SUP-001`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Free,
    Premium,
    Enterprise,
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerTier::Free => write!(f, "free"),
            CustomerTier::Premium => write!(f, "premium"),
            CustomerTier::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl std::str::FromStr for CustomerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(CustomerTier::Free),
            "premium" => Ok(CustomerTier::Premium),
            "enterprise" => Ok(CustomerTier::Enterprise),
            _ => Err(format!("Unknown customer tier: {}", s)),
        }
    }
}

/// A support ticket awaiting classification and routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketInput {
    pub ticket_id: TicketId,
    pub subject: String,
    pub message: String,
    pub customer_tier: CustomerTier,
    /// Monthly revenue from this customer; never negative
    pub monthly_revenue: f64,
    pub previous_tickets: u32,
    pub account_age_days: u32,
}

impl TicketInput {
    /// Check the invariants serde cannot express on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.ticket_id.as_str().trim().is_empty() {
            return Err("ticket_id must not be empty".to_string());
        }
        if !self.monthly_revenue.is_finite() || self.monthly_revenue < 0.0 {
            return Err(format!(
                "monthly_revenue must be a non-negative number, got {}",
                self.monthly_revenue
            ));
        }
        Ok(())
    }
}
