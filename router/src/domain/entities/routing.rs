//! Routing decision entity
//!
//! The terminal artifact of the pipeline: which queue a ticket goes to and at
//! what priority, with an audit string explaining why.

use serde::{Deserialize, Serialize};

use super::priority::PriorityRecord;
use super::triage::TriageRecord;

/// Support queue a ticket can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    #[serde(rename = "Security_Response_Team")]
    SecurityResponseTeam,
    #[serde(rename = "Tier_3_Engineering")]
    Tier3Engineering,
    #[serde(rename = "Tier_2_Technical")]
    Tier2Technical,
    #[serde(rename = "Tier_1_Support")]
    Tier1Support,
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Product_Feedback")]
    ProductFeedback,
}

impl Queue {
    pub const ALL: [Queue; 6] = [
        Queue::SecurityResponseTeam,
        Queue::Tier3Engineering,
        Queue::Tier2Technical,
        Queue::Tier1Support,
        Queue::Sales,
        Queue::ProductFeedback,
    ];
}

impl std::fmt::Display for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Queue::SecurityResponseTeam => write!(f, "Security_Response_Team"),
            Queue::Tier3Engineering => write!(f, "Tier_3_Engineering"),
            Queue::Tier2Technical => write!(f, "Tier_2_Technical"),
            Queue::Tier1Support => write!(f, "Tier_1_Support"),
            Queue::Sales => write!(f, "Sales"),
            Queue::ProductFeedback => write!(f, "Product_Feedback"),
        }
    }
}

impl std::str::FromStr for Queue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Queue::ALL
            .into_iter()
            .find(|queue| queue.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown queue: {}", s))
    }
}

/// Final priority of a routed ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Critical => write!(f, "Critical"),
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Final routing decision for a ticket
///
/// Output-only: built through `new` or `fallback`, never deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub recommended_queue: Queue,
    pub priority: Priority,
    /// Which rule fired and the inputs that justified it; never empty
    pub reasoning: String,
}

impl RoutingDecision {
    pub fn new(recommended_queue: Queue, priority: Priority, reasoning: impl Into<String>) -> Self {
        let reasoning = reasoning.into();
        debug_assert!(!reasoning.trim().is_empty(), "reasoning must not be empty");
        Self {
            recommended_queue,
            priority,
            reasoning,
        }
    }

    /// Safe default used whenever classification fails
    pub fn fallback(cause: &str) -> Self {
        Self::new(
            Queue::Tier1Support,
            Priority::Medium,
            format!("Pipeline error - defaulting to standard routing: {}", cause),
        )
    }
}

/// Everything one pipeline run produced
///
/// `triage` and `priority` are present only for the stages that succeeded;
/// `fault` is set iff `decision` is the fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub decision: RoutingDecision,
    pub triage: Option<TriageRecord>,
    pub priority: Option<PriorityRecord>,
    pub fault: Option<String>,
}

impl PipelineOutcome {
    pub fn is_fallback(&self) -> bool {
        self.fault.is_some()
    }
}
