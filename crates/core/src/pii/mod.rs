//! PII stripping for payloads crossing the trust boundary to an external
//! generation backend.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

const REDACTED: &str = "[REDACTED]";
const REDACTED_EMAIL: &str = "[REDACTED_EMAIL]";

lazy_static! {
    /// Field names whose values are dropped wholesale, matched
    /// case-insensitively.
    static ref PII_KEYS: Vec<&'static str> = vec![
        "email",
        "name",
        "first_name",
        "last_name",
        "user_id",
        "account_number",
        "snaptrade_user_id",
        "snaptrade_user_secret",
        "snaptrade_authorization_id",
        "snaptrade_account_id",
    ];
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
}

/// Return a structurally identical copy of `value` with sensitive field
/// values replaced by a redaction marker and e-mail addresses embedded in
/// free text replaced likewise. Symbols, values and percentages pass
/// through unchanged.
pub fn strip_pii(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| {
                    if PII_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), strip_pii(val))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_pii).collect()),
        Value::String(text) => {
            Value::String(EMAIL_RE.replace_all(text, REDACTED_EMAIL).into_owned())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sensitive_keys_redacted_case_insensitively() {
        let stripped = strip_pii(&json!({
            "Email": "jo@example.com",
            "accountNumber": "12345",
            "account_number": "12345",
            "symbol": "VGRO.TO",
        }));

        assert_eq!(stripped["Email"], REDACTED);
        assert_eq!(stripped["account_number"], REDACTED);
        // camelCase variant is not on the key list; only its embedded
        // e-mail patterns would be touched.
        assert_eq!(stripped["accountNumber"], "12345");
        assert_eq!(stripped["symbol"], "VGRO.TO");
    }

    #[test]
    fn test_embedded_emails_replaced_in_free_text() {
        let stripped = strip_pii(&json!({
            "note": "contact jane.doe+x@mail.example.org for details",
        }));
        assert_eq!(
            stripped["note"],
            format!("contact {} for details", REDACTED_EMAIL)
        );
    }

    #[test]
    fn test_nested_structures_and_scalars_pass_through() {
        let stripped = strip_pii(&json!({
            "holdings": [
                {"symbol": "XEQT.TO", "weightPct": 42.5, "user_id": "abc"},
            ],
            "totalValueCents": 1_000_000,
            "ok": true,
            "nothing": null,
        }));

        assert_eq!(stripped["holdings"][0]["symbol"], "XEQT.TO");
        assert_eq!(stripped["holdings"][0]["weightPct"], 42.5);
        assert_eq!(stripped["holdings"][0]["user_id"], REDACTED);
        assert_eq!(stripped["totalValueCents"], 1_000_000);
        assert_eq!(stripped["ok"], true);
        assert!(stripped["nothing"].is_null());
    }
}
