//! Country name to ISO-3 code mapping.

/// Convert a full country name as reported by providers to a 3-letter code.
/// Unknown names map to "OTH".
pub fn country_to_code(country_name: &str) -> &'static str {
    match country_name {
        "United States" => "USA",
        "Canada" => "CAN",
        "Japan" => "JPN",
        "United Kingdom" => "GBR",
        "China" => "CHN",
        "Germany" => "DEU",
        "France" => "FRA",
        "Australia" => "AUS",
        "Switzerland" => "CHE",
        "South Korea" => "KOR",
        "Netherlands" => "NLD",
        "Sweden" => "SWE",
        "Hong Kong" => "HKG",
        "India" => "IND",
        "Brazil" => "BRA",
        "Taiwan" => "TWN",
        "Singapore" => "SGP",
        "Ireland" => "IRL",
        _ => "OTH",
    }
}
