//! Classifier port
//!
//! The external classifiers are stochastic: identical prompts may yield
//! different records. The core only depends on this narrow contract.

use async_trait::async_trait;

use crate::error::ClassifierError;

/// Maps formatted prompt text to a structured record of type `R`
///
/// Implementations own their timeout and rate-limit policy. A record that
/// violates its field constraints is reported as an error, never returned.
#[async_trait]
pub trait Classifier<R>: Send + Sync
where
    R: Send + 'static,
{
    async fn classify(&self, prompt: &str) -> Result<R, ClassifierError>;
}
