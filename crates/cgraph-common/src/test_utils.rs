//! Test utilities and shared test helpers for contrib-graph.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may have installed a subscriber already.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a calendar date.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Build a raw provider payload (date string to count) from pairs.
pub fn raw_daily(entries: &[(&str, u64)]) -> HashMap<String, u64> {
    entries
        .iter()
        .map(|(date, count)| ((*date).to_string(), *count))
        .collect()
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid configuration that reads from fixtures.
    pub fn fixture_config_yaml() -> &'static str {
        r#"
data:
  mode: fixture
  fixture_dir: "fixtures"

chart:
  enabled: false
"#
    }

    /// Create a full live configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "github:\n",
            "  enabled: true\n",
            "  user: \"octocat\"\n",
            "  token: \"ghp_test_token\"\n",
            "  api_url: \"https://api.github.com\"\n",
            "  timeout_seconds: 10\n",
            "  max_retries: 3\n",
            "  rate_limit_per_sec: 5\n",
            "\n",
            "gitlab:\n",
            "  enabled: true\n",
            "  user: \"tanuki\"\n",
            "  token: \"glpat_test_token\"\n",
            "  base_url: \"https://gitlab.com\"\n",
            "\n",
            "data:\n",
            "  mode: live\n",
            "  since: \"2022-01-01\"\n",
            "  lookback_days: 365\n",
            "  clip_to_since: true\n",
            "\n",
            "chart:\n",
            "  enabled: true\n",
            "  title: \"Contributions\"\n",
            "  width: 1000\n",
            "  height: 500\n",
            "  output: \"out/contributions.png\"\n",
            "  background: \"#fafafa\"\n",
            "  show_combined: true\n",
            "  series:\n",
            "    github:\n",
            "      name: \"GitHub\"\n",
            "      color: \"#24292e\"\n",
            "      line_style: dashed\n",
            "    gitlab:\n",
            "      name: \"GitLab\"\n",
            "      color: \"#fc6d26\"\n",
            "      line_style: dashed\n",
            "    combined:\n",
            "      name: \"Combined\"\n",
            "      color: \"#6f42c1\"\n",
            "      line_style: area\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: json\n"
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use super::mock_date;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Strategy for dates between 2000-01-01 and roughly 2040.
    pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..15_000).prop_map(|offset| mock_date(2000, 1, 1) + Duration::days(offset))
    }

    /// Strategy for raw provider payloads keyed by ISO dates.
    pub fn raw_daily_strategy(max_entries: usize) -> impl Strategy<Value = HashMap<String, u64>> {
        prop::collection::hash_map(
            date_strategy().prop_map(|d| d.format("%Y-%m-%d").to_string()),
            0u64..500,
            0..max_entries,
        )
    }

    /// Same as [`raw_daily_strategy`] but never empty.
    pub fn non_empty_raw_daily_strategy(
        max_entries: usize,
    ) -> impl Strategy<Value = HashMap<String, u64>> {
        prop::collection::hash_map(
            date_strategy().prop_map(|d| d.format("%Y-%m-%d").to_string()),
            0u64..500,
            1..max_entries.max(2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_date() {
        let date = mock_date(2024, 2, 29);
        assert_eq!(date.to_string(), "2024-02-29");
    }

    #[test]
    fn test_raw_daily() {
        let raw = raw_daily(&[("2022-01-05", 2), ("2022-03-01", 1)]);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["2022-01-05"], 2);
    }

    #[test]
    fn test_temp_dir_exists() {
        let dir = create_temp_dir();
        assert!(dir.path().exists());
    }

    proptest! {
        #[test]
        fn test_property_dates_in_range(date in property_testing::date_strategy()) {
            prop_assert!(date >= mock_date(2000, 1, 1));
            prop_assert!(date < mock_date(2042, 1, 1));
        }
    }
}
