//! Concentration audit - look-through exposure and threshold alerts.

mod concentration_model;
mod concentration_service;

pub use concentration_model::*;
pub use concentration_service::*;

#[cfg(test)]
mod concentration_service_tests;
