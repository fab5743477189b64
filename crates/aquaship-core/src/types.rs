//! Domain types shared across the serviceability engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse delivery region, inferred from the state name when a source does
/// not supply it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Northeast,
    Central,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Northeast => "Northeast",
            Region::Central => "Central",
        };
        write!(f, "{s}")
    }
}

/// One row of the static pincode directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalRecord {
    pub code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub region: Region,
    pub delivery_time: String,
    pub shipping_cost: f64,
    pub serviceable: bool,
}

/// Which component(s) supplied a resolved record's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Local,
    Api,
    Hybrid,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Local => write!(f, "local"),
            Provenance::Api => write!(f, "api"),
            Provenance::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// How many independent sources corroborated a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Final output of a serviceability resolution.
///
/// Never constructed when both the directory and the remote resolver miss;
/// total failure surfaces as `None` from the service instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    #[serde(flatten)]
    pub record: PostalRecord,
    pub source: Provenance,
    pub confidence: Confidence,
    pub last_updated: DateTime<Utc>,
}

/// Returns `true` iff `code` is a well-formed pincode: six ASCII digits,
/// the first in `1..=9`.
#[must_use]
pub fn validate_pincode(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 6
        && (b'1'..=b'9').contains(&bytes[0])
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_code() {
        assert!(validate_pincode("110001"));
        assert!(validate_pincode("999999"));
    }

    #[test]
    fn validate_rejects_leading_zero() {
        assert!(!validate_pincode("012345"));
    }

    #[test]
    fn validate_rejects_wrong_length() {
        assert!(!validate_pincode("12345"));
        assert!(!validate_pincode("1234567"));
        assert!(!validate_pincode(""));
    }

    #[test]
    fn validate_rejects_non_digits() {
        assert!(!validate_pincode("abcdef"));
        assert!(!validate_pincode("11000a"));
        assert!(!validate_pincode("11 001"));
    }

    #[test]
    fn provenance_display() {
        assert_eq!(Provenance::Local.to_string(), "local");
        assert_eq!(Provenance::Api.to_string(), "api");
        assert_eq!(Provenance::Hybrid.to_string(), "hybrid");
    }

    #[test]
    fn confidence_orders_low_to_high() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }
}
