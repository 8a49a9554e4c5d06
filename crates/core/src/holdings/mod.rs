//! Holdings normalization - canonical, weight-annotated positions table.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use holdings_model::*;
pub use holdings_service::*;
pub use holdings_traits::*;
