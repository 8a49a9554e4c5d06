//! Market data collaborator surface for the blind-spot analysis pipeline.
//!
//! This crate defines:
//! - [`MarketDataProvider`]: the trait external market-data sources implement
//!   (historical daily bars, instrument profile, fund sector weightings)
//! - [`provider::yahoo::YahooProvider`]: the Yahoo Finance implementation
//! - [`resolver`]: the ordered composition-resolver chain that turns a symbol
//!   into sector/country weight maps (static look-through table first, then
//!   provider data, else empty)
//! - [`errors::MarketDataError`]: the error taxonomy with transient/terminal
//!   classification

pub mod errors;
pub mod lookthrough;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::MarketDataError;
pub use models::{Composition, InstrumentProfile, PriceBar};
pub use provider::MarketDataProvider;
pub use resolver::{
    country_to_code, CompositionResolver, CompositionResolverChain, ResolvedComposition,
};
