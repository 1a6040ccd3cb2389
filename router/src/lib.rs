//! Ticket Router
//!
//! Routes customer support tickets to a queue and priority. Two stochastic
//! classifiers (triage and prioritization) feed a deterministic decision
//! table; evaluators measure accuracy against ground truth and consistency
//! across repeated runs.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(test)]
mod test_utils;
