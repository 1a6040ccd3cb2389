//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Classification records, routing decisions and evaluation reports
//! - `ports`: Trait definitions for the classifiers and the router

pub mod entities;
pub mod ports;
