//! Consistency evaluation entities
//!
//! Frequency distributions over repeated runs on identical input. The
//! classifiers are stochastic, so these types characterize variance rather
//! than hide it.

use serde::Serialize;

use super::routing::{Priority, Queue};
use super::ticket::TicketId;
use super::triage::{Category, Sentiment, TriageRecord, UrgencyScore};

/// `count / total` as a percentage; zero when there is nothing to count
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}

/// One distinct value and how often it was observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry<T> {
    pub value: T,
    pub count: usize,
    pub percentage: f64,
}

/// Frequency distribution that remembers first-observed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution<T> {
    entries: Vec<DistributionEntry<T>>,
    total: usize,
}

impl<T: PartialEq> Distribution<T> {
    pub fn from_observations<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut entries: Vec<DistributionEntry<T>> = Vec::new();
        let mut total = 0;

        for value in values {
            total += 1;
            match entries.iter_mut().find(|entry| entry.value == value) {
                Some(entry) => entry.count += 1,
                None => entries.push(DistributionEntry {
                    value,
                    count: 1,
                    percentage: 0.0,
                }),
            }
        }

        for entry in &mut entries {
            entry.percentage = percentage(entry.count, total);
        }

        Self { entries, total }
    }

    /// Entries in the order their value was first observed
    pub fn entries(&self) -> &[DistributionEntry<T>] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Exactly one distinct value was observed
    pub fn is_consistent(&self) -> bool {
        self.entries.len() == 1
    }

    /// Most frequent value; ties go to the value observed first
    pub fn mode(&self) -> Option<&T> {
        let mut best: Option<&DistributionEntry<T>> = None;
        for entry in &self.entries {
            if best.map_or(true, |current| entry.count > current.count) {
                best = Some(entry);
            }
        }
        best.map(|entry| &entry.value)
    }

    pub fn count_of(&self, value: &T) -> usize {
        self.entries
            .iter()
            .find(|entry| &entry.value == value)
            .map_or(0, |entry| entry.count)
    }
}

/// One pipeline run's (queue, priority) output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationSample {
    /// 1-based run index
    pub run: usize,
    pub queue: Queue,
    pub priority: Priority,
    /// The run hit a classifier fault and produced the fallback decision
    pub fallback: bool,
}

/// Stability of the full pipeline on one ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub ticket_id: TicketId,
    pub runs: usize,
    pub fallback_runs: usize,
    pub queue_consistent: bool,
    pub priority_consistent: bool,
    pub queue_distribution: Distribution<Queue>,
    pub priority_distribution: Distribution<Priority>,
    pub most_common_queue: Queue,
    pub most_common_priority: Priority,
    pub samples: Vec<EvaluationSample>,
}

impl ConsistencyReport {
    /// Build a report from the samples of one ticket. `None` when there are no samples.
    pub fn from_samples(ticket_id: TicketId, mut samples: Vec<EvaluationSample>) -> Option<Self> {
        // Runs may finish in any order; the mode tie-break is defined over run index.
        samples.sort_by_key(|sample| sample.run);

        let queue_distribution = Distribution::from_observations(samples.iter().map(|s| s.queue));
        let priority_distribution =
            Distribution::from_observations(samples.iter().map(|s| s.priority));

        let most_common_queue = *queue_distribution.mode()?;
        let most_common_priority = *priority_distribution.mode()?;

        Some(Self {
            ticket_id,
            runs: samples.len(),
            fallback_runs: samples.iter().filter(|s| s.fallback).count(),
            queue_consistent: queue_distribution.is_consistent(),
            priority_consistent: priority_distribution.is_consistent(),
            queue_distribution,
            priority_distribution,
            most_common_queue,
            most_common_priority,
            samples,
        })
    }

    /// Both queue and priority were identical across every run
    pub fn is_fully_consistent(&self) -> bool {
        self.queue_consistent && self.priority_consistent
    }
}

/// One triage-only run; `record` is `None` when the classifier faulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageSample {
    pub run: usize,
    pub record: Option<TriageRecord>,
}

/// Stability of the triage classifier alone on one ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageConsistencyReport {
    pub ticket_id: TicketId,
    pub runs: usize,
    pub failures: usize,
    pub category_consistent: bool,
    pub urgency_consistent: bool,
    pub sentiment_consistent: bool,
    pub category_distribution: Distribution<Category>,
    pub urgency_distribution: Distribution<UrgencyScore>,
    pub sentiment_distribution: Distribution<Sentiment>,
}

impl TriageConsistencyReport {
    pub fn from_samples(ticket_id: TicketId, mut samples: Vec<TriageSample>) -> Self {
        samples.sort_by_key(|sample| sample.run);

        let records: Vec<TriageRecord> = samples.iter().filter_map(|s| s.record).collect();
        let category_distribution =
            Distribution::from_observations(records.iter().map(|r| r.category));
        let urgency_distribution =
            Distribution::from_observations(records.iter().map(|r| r.urgency_score));
        let sentiment_distribution =
            Distribution::from_observations(records.iter().map(|r| r.sentiment));

        Self {
            ticket_id,
            runs: samples.len(),
            failures: samples.len() - records.len(),
            category_consistent: category_distribution.is_consistent(),
            urgency_consistent: urgency_distribution.is_consistent(),
            sentiment_consistent: sentiment_distribution.is_consistent(),
            category_distribution,
            urgency_distribution,
            sentiment_distribution,
        }
    }

    pub fn is_fully_consistent(&self) -> bool {
        self.category_consistent && self.urgency_consistent && self.sentiment_consistent
    }
}
