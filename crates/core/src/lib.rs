//! Blindspot Core - the portfolio blind-spot analysis pipeline.
//!
//! Pipeline stages, in dependency order:
//!
//! - [`holdings`]: normalizes raw positions + account metadata into the
//!   canonical, weight-annotated holdings table
//! - [`enrichment`]: best-effort per-symbol price history and composition
//!   collection, with replace-style cache persistence
//! - [`concentration`]: look-through sector/country exposure audit with
//!   threshold alerts
//! - [`correlation`]: pairwise return-correlation matrix and hidden-twin
//!   detection
//! - [`signals`]: generated-signal parsing plus deterministic rule-based
//!   fallbacks, merged without duplicating coverage
//! - [`analysis`]: orchestration of the stages above into one immutable
//!   analysis result
//!
//! Storage, account sync, API routing, and rendering are external
//! collaborators consumed through the traits defined per module. This crate
//! is database-agnostic.

pub mod analysis;
pub mod concentration;
pub mod constants;
pub mod correlation;
pub mod enrichment;
pub mod errors;
pub mod holdings;
pub mod pii;
pub mod signals;

pub use errors::Error;
pub use errors::Result;
