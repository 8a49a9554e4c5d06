//! Data models shared across providers and resolvers.

mod composition;
mod price_bar;
mod profile;

pub use composition::Composition;
pub use price_bar::PriceBar;
pub use profile::InstrumentProfile;
