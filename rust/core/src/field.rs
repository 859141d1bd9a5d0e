// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric text fields

use crate::error::{Error, Result};

/// Parse text typed into a coordinate or parameter field
///
/// Surrounding whitespace is ignored. Empty, partial or non-finite input is
/// rejected so callers can keep the previous value.
pub fn parse_number(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match fast_float::parse::<f64, _>(trimmed) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::InvalidNumber(text.to_string())),
    }
}

/// Parse `text` into `slot`, leaving `slot` untouched on failure
///
/// Returns whether the value was committed.
pub fn commit_number(slot: &mut f64, text: &str) -> bool {
    match parse_number(text) {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_number("42").unwrap(), 42.0);
        assert_eq!(parse_number(" -3.5 ").unwrap(), -3.5);
        assert_eq!(parse_number("1e2").unwrap(), 100.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_number("").is_err());
        assert!(parse_number("abc").is_err());
        assert!(parse_number("12px").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn test_commit_keeps_previous_on_failure() {
        let mut value = 7.0;
        assert!(!commit_number(&mut value, "seven"));
        assert_eq!(value, 7.0);
        assert!(commit_number(&mut value, "8.25"));
        assert_eq!(value, 8.25);
    }
}
