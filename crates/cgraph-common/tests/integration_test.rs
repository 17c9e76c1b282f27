//! Integration tests for cgraph-common crate.

use chrono::NaiveDate;
use cgraph_common::{days_before, parse_hex_color, redact_token, CGraphError, Provider};
use std::str::FromStr;

#[test]
fn test_provider_display() {
    assert_eq!(format!("{}", Provider::GitHub), "GitHub");
    assert_eq!(format!("{}", Provider::GitLab), "GitLab");
}

#[test]
fn test_provider_slug_and_parse() {
    for provider in Provider::ALL {
        assert_eq!(Provider::from_str(provider.slug()).unwrap(), provider);
    }
    assert_eq!(Provider::from_str("GitHub").unwrap(), Provider::GitHub);
    assert!(Provider::from_str("bitbucket").is_err());
}

#[test]
fn test_provider_serialization() {
    let serialized = serde_json::to_string(&Provider::GitLab).unwrap();
    assert_eq!(serialized, "\"gitlab\"");

    let deserialized: Provider = serde_json::from_str("\"github\"").unwrap();
    assert_eq!(deserialized, Provider::GitHub);
}

#[test]
fn test_days_before_crosses_year() {
    let today = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
    assert_eq!(
        days_before(today, 10),
        NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
    );
}

#[test]
fn test_hex_and_redaction_helpers() {
    assert_eq!(parse_hex_color("#fc6d26"), Some((252, 109, 38)));
    assert_eq!(redact_token("glpat-0123456789"), "****6789");
}

#[test]
fn test_provider_error_keeps_status() {
    let error = CGraphError::provider_with_status(Provider::GitLab, "Unauthorized", 401);
    match error {
        CGraphError::Provider {
            provider,
            status_code,
            ..
        } => {
            assert_eq!(provider, Provider::GitLab);
            assert_eq!(status_code, Some(401));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
