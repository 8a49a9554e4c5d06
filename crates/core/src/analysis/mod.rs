//! Analysis orchestration - the end-to-end pipeline and its result.

mod analysis_model;
mod analysis_service;
mod analysis_traits;

pub use analysis_model::*;
pub use analysis_service::*;
pub use analysis_traits::*;
