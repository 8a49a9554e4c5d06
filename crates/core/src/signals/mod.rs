//! Signal generation - context assembly, defensive parsing, fallbacks.

mod context;
mod parser;
mod signals_model;
mod signals_service;

pub use context::*;
pub use parser::*;
pub use signals_model::*;
pub use signals_service::*;
