//! The contribution source abstraction shared by live and fixture providers.

use async_trait::async_trait;
use cgraph_common::{CGraphError, Provider, Result};
use cgraph_graphs::{DailyContribution, ProviderStats};
use chrono::{Duration, NaiveDate};
use tracing::warn;

/// Inclusive date range contributions are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First day
    pub since: NaiveDate,
    /// Last day
    pub until: NaiveDate,
}

impl FetchWindow {
    /// Creates a window, rejecting `since` after `until`.
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self> {
        if since > until {
            return Err(CGraphError::validation_field(
                format!("since {} is after {}", since, until),
                "since",
            ));
        }
        Ok(Self { since, until })
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.until - self.since).num_days() + 1
    }

    /// The most recent `max_days` of the window.
    #[must_use]
    pub fn clamp_days(self, max_days: u32) -> Self {
        let max_days = i64::from(max_days.max(1));
        if self.days() <= max_days {
            return self;
        }
        Self {
            since: self.until - Duration::days(max_days - 1),
            until: self.until,
        }
    }
}

/// What one provider reported for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    /// Reporting provider
    pub provider: Provider,
    /// Per-day counts
    pub daily: DailyContribution,
    /// Scalar totals, when the provider could compute them
    pub stats: Option<ProviderStats>,
    /// Raw date keys that could not be parsed
    pub skipped: Vec<String>,
}

impl ProviderReport {
    /// Builds a report from a raw `date -> count` payload, skipping malformed dates.
    pub fn from_raw<I, K>(provider: Provider, raw: I, stats: Option<ProviderStats>) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let parsed = DailyContribution::parse_lossy(raw);
        for key in &parsed.skipped {
            warn!(provider = %provider, key = %key, "Skipping malformed contribution date");
        }
        Self {
            provider,
            daily: parsed.daily,
            stats,
            skipped: parsed.skipped,
        }
    }
}

/// A place contributions can be fetched from.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Provider this source reports for.
    fn provider(&self) -> Provider;

    /// Fetches per-day contributions and stats for `window`.
    async fn fetch(&self, window: FetchWindow) -> Result<ProviderReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        assert!(FetchWindow::new(date(2022, 2, 1), date(2022, 1, 1)).is_err());
        assert!(FetchWindow::new(date(2022, 1, 1), date(2022, 1, 1)).is_ok());
    }

    #[test]
    fn test_window_days() {
        let window = FetchWindow::new(date(2022, 1, 1), date(2022, 1, 31)).unwrap();
        assert_eq!(window.days(), 31);
    }

    #[test]
    fn test_clamp_keeps_short_windows() {
        let window = FetchWindow::new(date(2022, 1, 1), date(2022, 3, 1)).unwrap();
        assert_eq!(window.clamp_days(365), window);
    }

    #[test]
    fn test_clamp_keeps_most_recent_days() {
        let window = FetchWindow::new(date(2019, 1, 1), date(2022, 6, 30)).unwrap();
        let clamped = window.clamp_days(365);
        assert_eq!(clamped.until, date(2022, 6, 30));
        assert_eq!(clamped.days(), 365);
        assert_eq!(clamped.since, date(2021, 7, 1));
    }

    #[test]
    fn test_report_from_raw_skips_bad_dates() {
        let report = ProviderReport::from_raw(
            Provider::GitLab,
            [("2022-01-05", 2), ("bogus", 1)],
            None,
        );
        assert_eq!(report.daily.total(), 2);
        assert_eq!(report.skipped, vec!["bogus".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_source() {
        let mut source = MockContributionSource::new();
        source.expect_provider().return_const(Provider::GitHub);
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(ProviderReport::from_raw(Provider::GitHub, [("2022-01-01", 1)], None)));

        let window = FetchWindow::new(date(2022, 1, 1), date(2022, 2, 1)).unwrap();
        let report = source.fetch(window).await.unwrap();
        assert_eq!(source.provider(), Provider::GitHub);
        assert_eq!(report.daily.len(), 1);
    }
}
