use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sector and country weight maps for one symbol.
///
/// Values are percentages in 0-100. They need not sum to exactly 100
/// (rounding and data gaps are tolerated) and are consumed as fractional
/// contribution weights, never re-normalized.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub sectors: HashMap<String, Decimal>,
    pub countries: HashMap<String, Decimal>,
}

impl Composition {
    /// An empty composition means the symbol is unclassified; the auditor
    /// buckets its full weight under "Other".
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty() && self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_is_empty() {
        let mut composition = Composition::default();
        assert!(composition.is_empty());

        composition
            .sectors
            .insert("Technology".to_string(), dec!(100));
        assert!(!composition.is_empty());
    }
}
