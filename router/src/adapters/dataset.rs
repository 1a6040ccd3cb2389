//! JSON dataset loader
//!
//! Test cases are a JSON array of tickets; ground truth is a JSON object
//! keyed by ticket id.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::entities::{GroundTruth, TicketId, TicketInput};
use crate::error::DatasetError;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load tickets in file order, validating each and rejecting duplicate ids
pub async fn load_test_cases(path: impl AsRef<Path>) -> Result<Vec<TicketInput>, DatasetError> {
    let path = path.as_ref();
    let tickets: Vec<TicketInput> = read_json(path).await?;

    let mut seen = HashSet::with_capacity(tickets.len());
    for ticket in &tickets {
        ticket
            .validate()
            .map_err(|reason| DatasetError::InvalidTicket {
                ticket_id: ticket.ticket_id.clone(),
                reason,
            })?;
        if !seen.insert(&ticket.ticket_id) {
            return Err(DatasetError::DuplicateTicket(ticket.ticket_id.clone()));
        }
    }

    tracing::debug!(path = %path.display(), tickets = tickets.len(), "Loaded test cases");
    Ok(tickets)
}

pub async fn load_ground_truth(
    path: impl AsRef<Path>,
) -> Result<HashMap<TicketId, GroundTruth>, DatasetError> {
    let path = path.as_ref();
    let truth: HashMap<TicketId, GroundTruth> = read_json(path).await?;
    tracing::debug!(path = %path.display(), entries = truth.len(), "Loaded ground truth");
    Ok(truth)
}
