//! Shared utility functions.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Calendar date format used by every provider payload and the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that is not a zero-padded `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a YYYY-MM-DD date, got '{input}'")]
pub struct DateParseError {
    /// Value as received
    pub input: String,
}

/// Parses a zero-padded `YYYY-MM-DD` date.
///
/// Unlike chrono's `%Y-%m-%d`, the shape is exact: no sign, no surrounding
/// whitespace and two digits for month and day.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let error = || DateParseError {
        input: value.to_string(),
    };
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(error());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| error())
}

/// Masks a secret for log output, keeping the last four characters.
pub fn redact_token(token: &str) -> String {
    let visible: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

/// Returns the date `days` before `today`, saturating at the earliest representable date.
pub fn days_before(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Parses a hex color of the form `#RRGGBB` into its channels.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2022-01-05"),
            Ok(NaiveDate::from_ymd_opt(2022, 1, 5).unwrap())
        );
        assert_eq!(
            parse_iso_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn test_parse_iso_date_requires_exact_shape() {
        for input in [
            "2022-1-5",
            "2022-01-5",
            " 2022-01-05",
            "2022-01-05 ",
            "+2022-01-05",
            "2022/01/05",
            "20220105",
            "",
        ] {
            assert_eq!(
                parse_iso_date(input),
                Err(DateParseError {
                    input: input.to_string()
                }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert!(parse_iso_date("2022-02-30").is_err());
        assert!(parse_iso_date("2022-13-01").is_err());
    }

    #[test]
    fn test_redact_token() {
        assert_eq!(redact_token("ghp_abcdef123456"), "****3456");
        assert_eq!(redact_token("abc"), "****");
        assert_eq!(redact_token(""), "****");
    }

    #[test]
    fn test_days_before() {
        let today = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
        assert_eq!(
            days_before(today, 1),
            NaiveDate::from_ymd_opt(2022, 2, 28).unwrap()
        );
        assert_eq!(
            days_before(today, 365),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1f77b4"), Some((31, 119, 180)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#1f77b"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
