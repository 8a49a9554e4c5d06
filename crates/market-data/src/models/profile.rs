use serde::{Deserialize, Serialize};

/// Instrument classification data returned by a provider.
///
/// For a single security this is the whole composition story: the auditor
/// treats the one sector/country as a 100% weight. Funds usually leave
/// `sector` empty and expose their breakdown through fund sector weightings
/// instead.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentProfile {
    pub name: Option<String>,
    /// Quote type as reported by the provider (EQUITY, ETF, ...).
    pub quote_type: Option<String>,
    pub sector: Option<String>,
    /// Full country name as reported by the provider, not an ISO code.
    pub country: Option<String>,
}
