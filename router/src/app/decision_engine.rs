//! Routing decision engine
//!
//! Resolves a triage record and a priority record into a routing decision by
//! walking an ordered rule table. The first rule whose predicate holds wins,
//! so the order of `RULES` is policy: moving a row changes routing.
//!
//! The table is total. Anything no escalation rule claims lands on
//! `DEFAULT_RULE` (Tier 1 support). Note that a Low-impact bug never
//! escalates, whatever its urgency: rules 2-4 all require a paying customer.

use serde::Serialize;

use crate::domain::entities::{
    BusinessImpact, Category, CustomerRisk, Priority, PriorityRecord, Queue, RoutingDecision,
    Sentiment, TriageRecord, UrgencyScore,
};

/// Bugs at or above this urgency escalate to engineering for high-value customers
pub const ESCALATION_URGENCY: u8 = 4;

/// Identifies a row of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Security,
    CriticalEscalation,
    HighImpactEscalation,
    PayingCustomerBug,
    FeatureRequest,
    Billing,
    ChurnProtection,
    Default,
}

impl RuleId {
    /// 1-based position in the table
    pub fn level(self) -> u8 {
        match self {
            RuleId::Security => 1,
            RuleId::CriticalEscalation => 2,
            RuleId::HighImpactEscalation => 3,
            RuleId::PayingCustomerBug => 4,
            RuleId::FeatureRequest => 5,
            RuleId::Billing => 6,
            RuleId::ChurnProtection => 7,
            RuleId::Default => 8,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleId::Security => write!(f, "security"),
            RuleId::CriticalEscalation => write!(f, "critical_escalation"),
            RuleId::HighImpactEscalation => write!(f, "high_impact_escalation"),
            RuleId::PayingCustomerBug => write!(f, "paying_customer_bug"),
            RuleId::FeatureRequest => write!(f, "feature_request"),
            RuleId::Billing => write!(f, "billing"),
            RuleId::ChurnProtection => write!(f, "churn_protection"),
            RuleId::Default => write!(f, "default"),
        }
    }
}

/// The flattened inputs every rule predicate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingFacts {
    pub category: Category,
    pub urgency_score: UrgencyScore,
    pub sentiment: Sentiment,
    pub business_impact: BusinessImpact,
    pub customer_risk: CustomerRisk,
}

impl RoutingFacts {
    pub fn new(triage: &TriageRecord, priority: &PriorityRecord) -> Self {
        Self {
            category: triage.category,
            urgency_score: triage.urgency_score,
            sentiment: triage.sentiment,
            business_impact: priority.business_impact,
            customer_risk: priority.customer_risk,
        }
    }

    fn is_urgent(&self) -> bool {
        self.urgency_score.value() >= ESCALATION_URGENCY
    }
}

/// One row of the decision table
struct Rule {
    id: RuleId,
    applies: fn(&RoutingFacts) -> bool,
    queue: Queue,
    priority: fn(&RoutingFacts) -> Priority,
    reasoning: fn(&RoutingFacts) -> String,
}

impl Rule {
    fn decide(&self, facts: &RoutingFacts) -> RoutingDecision {
        RoutingDecision::new(
            self.queue,
            (self.priority)(facts),
            format!(
                "[rule {} {}] {}",
                self.id.level(),
                self.id,
                (self.reasoning)(facts)
            ),
        )
    }
}

static RULES: [Rule; 7] = [
    Rule {
        id: RuleId::Security,
        applies: |f| f.category == Category::SecurityConcern,
        queue: Queue::SecurityResponseTeam,
        priority: |_| Priority::Critical,
        reasoning: |_| "Security concern - mandatory escalation to security team".to_string(),
    },
    Rule {
        id: RuleId::CriticalEscalation,
        applies: |f| {
            f.business_impact == BusinessImpact::Critical
                && f.category == Category::Bug
                && f.is_urgent()
        },
        queue: Queue::Tier3Engineering,
        priority: |_| Priority::Critical,
        reasoning: |f| {
            format!(
                "Critical customer with urgent bug (urgency {}) - escalate to engineering",
                f.urgency_score
            )
        },
    },
    Rule {
        id: RuleId::HighImpactEscalation,
        applies: |f| {
            f.business_impact == BusinessImpact::High
                && f.category == Category::Bug
                && f.is_urgent()
        },
        queue: Queue::Tier3Engineering,
        priority: |_| Priority::Critical,
        reasoning: |f| {
            format!(
                "High-value customer with urgent bug (urgency {}) - escalate to engineering",
                f.urgency_score
            )
        },
    },
    Rule {
        id: RuleId::PayingCustomerBug,
        applies: |f| f.category == Category::Bug && f.business_impact.is_paying(),
        queue: Queue::Tier2Technical,
        priority: |f| {
            if f.business_impact.is_high_value() {
                Priority::High
            } else {
                Priority::Medium
            }
        },
        reasoning: |f| {
            format!(
                "Bug from {}-impact customer (urgency {}) - route to technical support",
                f.business_impact.label(),
                f.urgency_score
            )
        },
    },
    Rule {
        id: RuleId::FeatureRequest,
        applies: |f| f.category == Category::FeatureRequest,
        queue: Queue::ProductFeedback,
        priority: |f| {
            if f.business_impact.is_high_value() {
                Priority::Medium
            } else {
                Priority::Low
            }
        },
        reasoning: |f| {
            format!(
                "Feature request from {}-impact customer",
                f.business_impact.label()
            )
        },
    },
    Rule {
        id: RuleId::Billing,
        applies: |f| f.category == Category::BillingInquiry,
        queue: Queue::Sales,
        priority: |f| {
            if f.business_impact.is_high_value() {
                Priority::High
            } else {
                Priority::Medium
            }
        },
        reasoning: |f| {
            format!(
                "Billing inquiry from {}-impact customer",
                f.business_impact.label()
            )
        },
    },
    Rule {
        id: RuleId::ChurnProtection,
        applies: |f| f.customer_risk == CustomerRisk::High && f.business_impact.is_high_value(),
        queue: Queue::Tier2Technical,
        priority: |_| Priority::High,
        reasoning: |f| {
            format!(
                "High-risk {}-impact customer ({}) - prevent churn",
                f.business_impact.label(),
                f.category
            )
        },
    },
];

static DEFAULT_RULE: Rule = Rule {
    id: RuleId::Default,
    applies: |_| true,
    queue: Queue::Tier1Support,
    priority: |f| {
        if f.business_impact.is_high_value() {
            Priority::Medium
        } else {
            Priority::Low
        }
    },
    reasoning: |f| {
        format!(
            "General inquiry ({}, urgency {}) from {}-impact customer",
            f.category,
            f.urgency_score,
            f.business_impact.label()
        )
    },
};

/// One rule considered while tracing a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleEvaluation {
    pub rule: RuleId,
    pub level: u8,
    pub matched: bool,
}

/// Audit trail of a decision: inputs, the rules tried in order, and the winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTrace {
    pub facts: RoutingFacts,
    pub evaluated: Vec<RuleEvaluation>,
    pub fired: RuleId,
    pub decision: RoutingDecision,
}

/// Stateless rule-table evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve two classification records into a routing decision
    pub fn decide(&self, triage: &TriageRecord, priority: &PriorityRecord) -> RoutingDecision {
        let facts = RoutingFacts::new(triage, priority);
        select(&facts).decide(&facts)
    }

    /// Like [`decide`](Self::decide), but also reports which rules were tried
    pub fn trace(&self, triage: &TriageRecord, priority: &PriorityRecord) -> DecisionTrace {
        let facts = RoutingFacts::new(triage, priority);

        let mut evaluated = Vec::new();
        let mut fired = &DEFAULT_RULE;
        for rule in RULES.iter() {
            let matched = (rule.applies)(&facts);
            evaluated.push(RuleEvaluation {
                rule: rule.id,
                level: rule.id.level(),
                matched,
            });
            if matched {
                fired = rule;
                break;
            }
        }
        if fired.id == RuleId::Default {
            evaluated.push(RuleEvaluation {
                rule: RuleId::Default,
                level: RuleId::Default.level(),
                matched: true,
            });
        }

        DecisionTrace {
            facts,
            evaluated,
            fired: fired.id,
            decision: fired.decide(&facts),
        }
    }
}

fn select(facts: &RoutingFacts) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .unwrap_or(&DEFAULT_RULE)
}
