//! Composition resolution.
//!
//! Two data sources feed the same concept (the static look-through table and
//! the live provider), so resolution is modeled as an ordered list of
//! strategies queried in priority order, stopping at the first non-empty
//! result.

mod chain;
mod country_codes;

pub use chain::{
    CompositionResolver, CompositionResolverChain, FundSectorResolver, ProfileResolver,
    ResolvedComposition, StaticLookthroughResolver,
};
pub use country_codes::country_to_code;
