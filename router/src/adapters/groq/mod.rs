//! Groq adapter
//!
//! Hosted-model implementation of the classifier port.

pub mod client;
pub mod prompts;

pub use client::GroqClassifier;
