//! Defensive parsing of generation-backend responses.
//!
//! Backends are instructed to return a bare JSON array, but responses
//! drift: code fences, preamble text, or a wrapping object. Parsing tries
//! progressively looser strategies and never errors; an unparseable
//! response yields an empty list.

use log::warn;
use serde_json::Value;

use crate::signals::Signal;

/// Parse a raw backend response into signals.
///
/// Strategies, in order: direct parse of the trimmed response (bare array
/// or `{"signals": [..]}` object), the same after stripping code-fence
/// lines, then the substring between the first `[` and the last `]`.
/// Failures log the response length only, never its content.
pub fn parse_signals(raw_response: &str) -> Vec<Signal> {
    if raw_response.is_empty() {
        return Vec::new();
    }

    let mut text = raw_response.trim().to_string();
    if text.starts_with("```") {
        text = text
            .lines()
            .filter(|line| !line.trim_start().starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    if let Some(signals) = try_parse(&text) {
        return signals;
    }

    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if end > start {
            if let Ok(signals) = serde_json::from_str::<Vec<Signal>>(&text[start..=end]) {
                return signals;
            }
        }
    }

    warn!(
        "Failed to parse backend response into signals (length {})",
        raw_response.len()
    );
    Vec::new()
}

fn try_parse(text: &str) -> Option<Vec<Signal>> {
    match serde_json::from_str::<Value>(text).ok()? {
        value @ Value::Array(_) => serde_json::from_value(value).ok(),
        Value::Object(mut map) => {
            let signals = map.remove("signals")?;
            serde_json::from_value(signals).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal_json(id: &str) -> String {
        format!(
            r#"{{"signal_id": "{}", "title": "Tech concentration", "description": "High.",
                "severity": "warning", "category": "concentration",
                "affected_holdings": ["VFV.TO"], "recommendation": "Rebalance."}}"#,
            id
        )
    }

    #[test]
    fn test_bare_array() {
        let raw = format!("[{}]", signal_json("SIG-001"));
        let signals = parse_signals(&raw);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].signal_id, "SIG-001");
    }

    #[test]
    fn test_signals_object_wrapper() {
        let raw = format!(r#"{{"signals": [{}]}}"#, signal_json("SIG-002"));
        assert_eq!(parse_signals(&raw).len(), 1);
    }

    #[test]
    fn test_fenced_block() {
        let raw = format!("```json\n[{}]\n```", signal_json("SIG-003"));
        assert_eq!(parse_signals(&raw).len(), 1);
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let raw = format!(
            "Here is my analysis:\n[{}]\nLet me know if you need more.",
            signal_json("SIG-004")
        );
        let signals = parse_signals(&raw);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].affected_holdings, vec!["VFV.TO"]);
    }

    #[test]
    fn test_empty_response() {
        assert!(parse_signals("").is_empty());
    }

    #[test]
    fn test_garbage_yields_empty_list() {
        assert!(parse_signals("not json at all").is_empty());
        assert!(parse_signals("[1, 2, 3]").is_empty());
        assert!(parse_signals("{\"other\": true}").is_empty());
    }
}
