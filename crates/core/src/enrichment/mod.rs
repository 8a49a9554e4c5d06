//! Enrichment collection - per-symbol market-data fetches and caching.

mod enrichment_model;
mod enrichment_service;
mod enrichment_traits;

pub use enrichment_model::*;
pub use enrichment_service::*;
pub use enrichment_traits::*;
