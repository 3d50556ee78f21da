//! Transaction data models.
//!
//! This module defines:
//! - `AccountNumber`: the account identifier taken from the URL path
//! - `TransactionAmount`: the decimal amount sent as the request body
//! - `HeaderBag`: header name to values mapping passed to and from the account service

use std::fmt;

use axum::http::HeaderMap;
use indexmap::IndexMap;
use serde_json::Number;

use crate::error::AppError;

/// Account identifier as it appears in `/api/transactions/{acct_number}`.
///
/// Any 64-bit integer is accepted; the account service owns validation.
pub type AccountNumber = i64;

/// Mapping from header name to its values.
///
/// Keys keep the order they were inserted or decoded in, so a bag read from
/// the account service serializes back in the same order.
/// Serializes as `{"myHeader": ["myValue"]}`.
pub type HeaderBag = IndexMap<String, Vec<String>>;

/// Amount of a transaction.
///
/// Kept as the JSON number text exactly as received: no precision or
/// magnitude limit and no float conversion. Sign and magnitude are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionAmount(Number);

impl TransactionAmount {
    /// Parse a request body into an amount.
    ///
    /// # Accepted forms
    ///
    /// - bare JSON number: `142.12`
    /// - JSON string holding a JSON number: `"142.12"`
    /// - exponent notation: `1.4212e2`
    ///
    /// Surrounding whitespace is ignored. Anything that is not valid JSON
    /// number syntax (`1_000`, `+1`, `.5`) is rejected.
    pub fn parse_body(body: &str) -> Result<Self, AppError> {
        let trimmed = body.trim();
        let text = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();

        if text.is_empty() {
            return Err(AppError::InvalidAmount(
                "Request body must contain a decimal amount".to_string(),
            ));
        }

        serde_json::from_str::<Number>(text)
            .map(Self)
            .map_err(|_| AppError::InvalidAmount(format!("'{}' is not a decimal amount", text)))
    }

    /// JSON body used for the outbound call (a bare number, not a string).
    pub fn to_json_body(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Convert an inbound header map into a [`HeaderBag`].
///
/// Repeated headers keep every value in arrival order.
/// Values that are not valid UTF-8 are converted lossily.
pub fn header_bag_from(headers: &HeaderMap) -> HeaderBag {
    let mut bag = HeaderBag::new();
    for (name, value) in headers {
        bag.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_bare_number() {
        let amount = TransactionAmount::parse_body("142.12").unwrap();
        assert_eq!(amount.to_json_body(), "142.12");
    }

    #[test]
    fn test_parse_keeps_long_fraction() {
        let amount = TransactionAmount::parse_body("0.12345678901234567890123456789").unwrap();
        assert_eq!(amount.to_json_body(), "0.12345678901234567890123456789");
    }

    #[test]
    fn test_parse_keeps_large_magnitude() {
        let amount = TransactionAmount::parse_body("100000000000000000000000000000").unwrap();
        assert_eq!(amount.to_json_body(), "100000000000000000000000000000");

        let amount = TransactionAmount::parse_body("1e30").unwrap();
        assert_eq!(amount.to_json_body(), "1e30");
    }

    #[test]
    fn test_parse_quoted_and_padded() {
        let amount = TransactionAmount::parse_body("  \"-25.50\"\n").unwrap();
        assert_eq!(amount.to_json_body(), "-25.50");
    }

    #[test]
    fn test_parse_exponent() {
        let amount = TransactionAmount::parse_body("1.4212e2").unwrap();
        assert_eq!(amount.to_json_body(), "1.4212e2");
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        for body in ["   ", "{\"amount\": 1}", "1_000", "+1", ".5", "12abc"] {
            assert!(
                matches!(
                    TransactionAmount::parse_body(body),
                    Err(AppError::InvalidAmount(_))
                ),
                "{:?} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_header_bag_groups_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.append("x-trace", HeaderValue::from_static("a"));
        headers.append("x-trace", HeaderValue::from_static("b"));

        let bag = header_bag_from(&headers);

        assert_eq!(bag["content-type"], vec!["application/json"]);
        assert_eq!(bag["x-trace"], vec!["a", "b"]);
    }

    #[test]
    fn test_header_bag_keeps_decoded_order() {
        let body = r#"{"zHeader":["z"],"aHeader":["a"],"mHeader":["m1","m2"]}"#;
        let bag: HeaderBag = serde_json::from_str(body).unwrap();

        let names: Vec<_> = bag.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zHeader", "aHeader", "mHeader"]);
        assert_eq!(serde_json::to_string(&bag).unwrap(), body);
    }
}
