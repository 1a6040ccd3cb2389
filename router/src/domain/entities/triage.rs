//! Triage domain entity
//!
//! Content classification of a ticket: what kind of request it is, how urgent
//! the customer's language makes it, and how the customer feels.

use serde::{Deserialize, Serialize};

/// Primary category of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Bug")]
    Bug,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[serde(rename = "Security Concern")]
    SecurityConcern,
    #[serde(rename = "Billing Inquiry")]
    BillingInquiry,
    #[serde(rename = "General Question")]
    GeneralQuestion,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bug,
        Category::FeatureRequest,
        Category::SecurityConcern,
        Category::BillingInquiry,
        Category::GeneralQuestion,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Bug => write!(f, "Bug"),
            Category::FeatureRequest => write!(f, "Feature Request"),
            Category::SecurityConcern => write!(f, "Security Concern"),
            Category::BillingInquiry => write!(f, "Billing Inquiry"),
            Category::GeneralQuestion => write!(f, "General Question"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "bug" => Ok(Category::Bug),
            "feature request" => Ok(Category::FeatureRequest),
            "security concern" => Ok(Category::SecurityConcern),
            "billing inquiry" => Ok(Category::BillingInquiry),
            "general question" => Ok(Category::GeneralQuestion),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Urgency score from 1 (very low) to 5 (critical)
///
/// Only constructible through [`UrgencyScore::new`] (and serde, which routes
/// through it), so a value outside `1..=5` never exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UrgencyScore(u8);

impl UrgencyScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(score: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&score) {
            Ok(Self(score))
        } else {
            Err(format!(
                "urgency_score must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                score
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every valid score, lowest first
    pub fn all() -> impl Iterator<Item = UrgencyScore> {
        (Self::MIN..=Self::MAX).map(UrgencyScore)
    }
}

impl TryFrom<u8> for UrgencyScore {
    type Error = String;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl From<UrgencyScore> for u8 {
    fn from(score: UrgencyScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for UrgencyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentiment expressed in the ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Frustrated,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Frustrated,
    ];
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Frustrated => write!(f, "Frustrated"),
        }
    }
}

/// Output of the triage classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriageRecord {
    pub category: Category,
    pub urgency_score: UrgencyScore,
    pub sentiment: Sentiment,
}

impl TriageRecord {
    pub fn new(category: Category, urgency_score: UrgencyScore, sentiment: Sentiment) -> Self {
        Self {
            category,
            urgency_score,
            sentiment,
        }
    }
}
