//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod dataset;
pub mod groq;

pub use dataset::{load_ground_truth, load_test_cases};
pub use groq::GroqClassifier;
