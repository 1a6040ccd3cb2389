//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod classifier;
pub mod router;

pub use classifier::Classifier;
pub use router::TicketRouter;
