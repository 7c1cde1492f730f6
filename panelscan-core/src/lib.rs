//! Core library for panelscan: the reference panel data model and the
//! sequence utilities shared by the variant-calling pipeline.
//!
//! This crate owns everything that outlives a single query: the curated
//! [`ReferencePanel`](models::ReferencePanel) (loaded once from JSON and
//! immutable thereafter) and the nucleotide/protein alphabet helpers in
//! [`sequence`]. The per-query pipeline lives in `panelscan-call`.

pub mod errors;
pub mod models;
pub mod sequence;

// re-export for cleaner imports
pub use self::errors::PanelError;
pub use self::models::{Domain, DomainSpan, ReferenceEntry, ReferencePanel};
