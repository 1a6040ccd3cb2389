//! Prioritization domain entity
//!
//! Business-value assessment of the customer behind a ticket.

use serde::{Deserialize, Serialize};

/// Business impact of the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessImpact {
    Critical,
    High,
    Medium,
    Low,
}

impl BusinessImpact {
    pub const ALL: [BusinessImpact; 4] = [
        BusinessImpact::Critical,
        BusinessImpact::High,
        BusinessImpact::Medium,
        BusinessImpact::Low,
    ];

    /// Critical or High impact
    pub fn is_high_value(self) -> bool {
        matches!(self, BusinessImpact::Critical | BusinessImpact::High)
    }

    /// Anything above Low impact
    pub fn is_paying(self) -> bool {
        !matches!(self, BusinessImpact::Low)
    }

    /// Lowercase label used in reasoning strings
    pub fn label(self) -> &'static str {
        match self {
            BusinessImpact::Critical => "critical",
            BusinessImpact::High => "high",
            BusinessImpact::Medium => "medium",
            BusinessImpact::Low => "low",
        }
    }
}

impl std::fmt::Display for BusinessImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessImpact::Critical => write!(f, "Critical"),
            BusinessImpact::High => write!(f, "High"),
            BusinessImpact::Medium => write!(f, "Medium"),
            BusinessImpact::Low => write!(f, "Low"),
        }
    }
}

/// Risk that the customer churns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerRisk {
    High,
    Medium,
    Low,
}

impl CustomerRisk {
    pub const ALL: [CustomerRisk; 3] =
        [CustomerRisk::High, CustomerRisk::Medium, CustomerRisk::Low];
}

impl std::fmt::Display for CustomerRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerRisk::High => write!(f, "High"),
            CustomerRisk::Medium => write!(f, "Medium"),
            CustomerRisk::Low => write!(f, "Low"),
        }
    }
}

/// Output of the prioritization classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityRecord {
    pub business_impact: BusinessImpact,
    pub customer_risk: CustomerRisk,
}

impl PriorityRecord {
    pub fn new(business_impact: BusinessImpact, customer_risk: CustomerRisk) -> Self {
        Self {
            business_impact,
            customer_risk,
        }
    }
}
