//! Unified error types for the ticket router
//!
//! This module defines error types for each boundary:
//! - `ClassifierError`: faults at the external classifier boundary
//! - `DatasetError`: loading evaluation data from disk
//! - `EvaluationError`: faults surfaced to evaluation callers

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::TicketId;

/// Classifier boundary errors
///
/// Always absorbed by the pipeline into a fallback decision.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Classifier timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    #[error("Classifier returned no output")]
    EmptyResponse,

    #[error("Malformed structured output: {0}")]
    Malformed(String),
}

/// Evaluation data loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate ticket id: {0}")]
    DuplicateTicket(TicketId),

    #[error("Invalid ticket {ticket_id}: {reason}")]
    InvalidTicket { ticket_id: TicketId, reason: String },
}

/// Errors surfaced to evaluation callers
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("No ground truth for ticket {0}")]
    MissingGroundTruth(TicketId),

    #[error("Run count must be at least 1, got {0}")]
    InvalidRunCount(usize),

    #[error("No test cases to evaluate")]
    NoCases,
}
