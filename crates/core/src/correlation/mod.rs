//! Correlation analysis - return matrices and hidden-twin detection.

mod correlation_model;
mod correlation_service;

pub use correlation_model::*;
pub use correlation_service::*;

#[cfg(test)]
mod correlation_service_tests;
