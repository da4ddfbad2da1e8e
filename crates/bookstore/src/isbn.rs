use core::str::FromStr;

use serde::{Deserialize, Serialize};

use portico_core::{DomainError, ValueObject};

/// ISBN-13 book identifier.
///
/// Only the check digit is validated. Hyphens are accepted on input and
/// dropped, so `978-3-86490-387-8` and `9783864903878` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn13(String);

impl Isbn13 {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn check_digit(digits: &[u32]) -> u32 {
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
            .sum();
        (10 - sum % 10) % 10
    }
}

impl ValueObject for Isbn13 {}

impl FromStr for Isbn13 {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.trim().chars().filter(|c| *c != '-').collect();

        let digits = compact
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(|| DomainError::invalid_id(format!("ISBN13 '{s}' contains non-digit characters")))?;

        if digits.len() != 13 {
            return Err(DomainError::invalid_id(format!(
                "ISBN13 '{s}' must have 13 digits, found {}",
                digits.len()
            )));
        }

        let expected = Self::check_digit(&digits[..12]);
        let given = digits[12];
        if expected != given {
            return Err(DomainError::invalid_id(format!(
                "invalid ISBN13 '{s}': expected check digit {expected}, given {given}"
            )));
        }

        Ok(Self(compact))
    }
}

impl TryFrom<String> for Isbn13 {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Isbn13> for String {
    fn from(value: Isbn13) -> Self {
        value.0
    }
}

impl core::fmt::Display for Isbn13 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_and_compact_forms() {
        let hyphenated: Isbn13 = "978-3-86490-387-8".parse().unwrap();
        let compact: Isbn13 = "9783864903878".parse().unwrap();
        assert_eq!(hyphenated, compact);
        assert_eq!(hyphenated.as_str(), "9783864903878");
    }

    #[test]
    fn rejects_wrong_check_digit() {
        let err = "978-3-86490-387-9".parse::<Isbn13>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.contains("expected check digit 8")));
    }

    #[test]
    fn rejects_wrong_length_and_letters() {
        assert!("978-3-86490-387".parse::<Isbn13>().is_err());
        assert!("978-3-86490-38X-8".parse::<Isbn13>().is_err());
        assert!("".parse::<Isbn13>().is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Isbn13>("\"978-1-60309-025-4\"").is_ok());
        assert!(serde_json::from_str::<Isbn13>("\"978-1-60309-025-5\"").is_err());
    }
}
