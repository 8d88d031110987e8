//! # RUT — Chilean National Identity Number
//!
//! First-class identifier type for person matching throughout the
//! registry. A RUT consists of a numeric body and a modulo-11 check
//! digit (`0`-`9` or `K`).
//!
//! ## Canonical Form
//!
//! Input may arrive with thousands separators and either case for the
//! `K` verifier (`12.345.678-5`, `12345678-5`, `11.111.112-k`). The
//! constructor strips separators, uppercases the verifier, and validates
//! the check digit. Two `Rut` values compare equal iff their canonical
//! forms are equal, so formatting differences never split a person's
//! identity.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A validated Chilean RUT in canonical `body-verifier` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rut {
    body: String,
    verifier: char,
}

impl Rut {
    /// Parse and validate a RUT from user input.
    ///
    /// Accepts dots as thousands separators, an optional dash before the
    /// verifier, and a lowercase `k`. The check digit is validated with
    /// the standard modulo-11 algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRut`] if the input is malformed or the
    /// check digit does not match the body.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '-' && !c.is_whitespace())
            .collect();

        if cleaned.len() < 2 {
            return Err(CoreError::InvalidRut {
                input: input.to_string(),
                reason: "too short".to_string(),
            });
        }

        let verifier = cleaned
            .chars()
            .last()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| c.is_ascii_digit() || *c == 'K')
            .ok_or_else(|| CoreError::InvalidRut {
                input: input.to_string(),
                reason: "verifier must be a digit or K".to_string(),
            })?;

        let body = &cleaned[..cleaned.len() - 1];
        if body.is_empty() || body.len() > 9 || !body.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidRut {
                input: input.to_string(),
                reason: "body must be 1-9 digits".to_string(),
            });
        }

        let expected = compute_verifier(body);
        if verifier != expected {
            return Err(CoreError::InvalidRut {
                input: input.to_string(),
                reason: format!("check digit mismatch (expected {expected})"),
            });
        }

        Ok(Self {
            body: body.to_string(),
            verifier,
        })
    }

    /// The numeric body, without separators or verifier.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The check digit (`0`-`9` or `K`).
    pub fn verifier(&self) -> char {
        self.verifier
    }
}

impl std::fmt::Display for Rut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.body, self.verifier)
    }
}

impl std::str::FromStr for Rut {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rut::parse(&s).map_err(de::Error::custom)
    }
}

/// Compute the modulo-11 check digit for a numeric RUT body.
///
/// Digits are weighted 2..=7 from the rightmost position, cycling. The
/// verifier is `11 - (sum mod 11)`, with 11 mapping to `0` and 10 to `K`.
fn compute_verifier(body: &str) -> char {
    let mut sum: u32 = 0;
    let mut factor: u32 = 2;
    for c in body.chars().rev() {
        // Caller guarantees ASCII digits only.
        sum += c.to_digit(10).unwrap_or(0) * factor;
        factor = if factor == 7 { 2 } else { factor + 1 };
    }
    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10).unwrap_or('0'),
    }
}
