//! System health scoring
//!
//! Banding of the composite score. The thresholds are policy constants.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::accuracy::AccuracyReport;
use super::consistency::{ConsistencyReport, TriageConsistencyReport};

/// Minimum overall score for an excellent rating
pub const EXCELLENT_THRESHOLD: f64 = 90.0;

/// Minimum overall score for a good rating
pub const GOOD_THRESHOLD: f64 = 80.0;

/// Minimum overall score for a fair rating
pub const FAIR_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            HealthBand::Excellent
        } else if score >= GOOD_THRESHOLD {
            HealthBand::Good
        } else if score >= FAIR_THRESHOLD {
            HealthBand::Fair
        } else {
            HealthBand::Poor
        }
    }
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthBand::Excellent => write!(f, "EXCELLENT"),
            HealthBand::Good => write!(f, "GOOD"),
            HealthBand::Fair => write!(f, "FAIR"),
            HealthBand::Poor => write!(f, "POOR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthScore {
    pub overall: f64,
    pub band: HealthBand,
}

impl HealthScore {
    /// Unweighted mean of the three percentages
    pub fn compute(routing_accuracy: f64, category_accuracy: f64, consistency_rate: f64) -> Self {
        let overall = (routing_accuracy + category_accuracy + consistency_rate) / 3.0;
        Self {
            overall,
            band: HealthBand::from_score(overall),
        }
    }
}

/// Full evaluation of the system over one dataset
#[derive(Debug, Clone, Serialize)]
pub struct SystemEvaluation {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub routing_accuracy: f64,
    pub category_accuracy: f64,
    /// Share of tickets whose queue and priority never varied
    pub consistency_rate: f64,
    pub queue_consistency_rate: f64,
    pub triage_consistency_rate: f64,
    pub triage_category_consistency_rate: f64,
    pub health: HealthScore,
    pub accuracy: AccuracyReport,
    pub consistency: Vec<ConsistencyReport>,
    pub triage_consistency: Vec<TriageConsistencyReport>,
}
