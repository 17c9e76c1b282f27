//! Per-day contribution counts of one provider.

use crate::date_key::{parse_date, MonthBucket};
use crate::error::AggregateResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Date-ordered map from calendar day to contribution count.
///
/// Built once from a provider's raw `date -> count` payload through
/// [`DailyContribution::parse`] or [`DailyContribution::parse_lossy`] and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyContribution {
    days: BTreeMap<NaiveDate, u64>,
}

/// Outcome of [`DailyContribution::parse_lossy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossyParse {
    /// Entries whose key parsed.
    pub daily: DailyContribution,
    /// Keys that were not `YYYY-MM-DD`, in input order.
    pub skipped: Vec<String>,
}

impl DailyContribution {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw payload, failing on the first malformed key.
    pub fn parse<I, K>(raw: I) -> AggregateResult<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut daily = Self::new();
        for (key, count) in raw {
            daily.insert(parse_date(key.as_ref())?, count);
        }
        Ok(daily)
    }

    /// Parses a raw payload, skipping malformed keys and reporting them.
    pub fn parse_lossy<I, K>(raw: I) -> LossyParse
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut parsed = LossyParse::default();
        for (key, count) in raw {
            match parse_date(key.as_ref()) {
                Ok(date) => parsed.daily.insert(date, count),
                Err(_) => parsed.skipped.push(key.as_ref().to_string()),
            }
        }
        parsed
    }

    /// Adds `count` to the entry for `date`.
    pub fn insert(&mut self, date: NaiveDate, count: u64) {
        let entry = self.days.entry(date).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count recorded for `date`, zero when absent.
    pub fn get(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// Entries on or after `since`.
    #[must_use]
    pub fn since(&self, since: NaiveDate) -> Self {
        Self {
            days: self
                .days
                .range(since..)
                .map(|(date, count)| (*date, *count))
                .collect(),
        }
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.days.iter().map(|(date, count)| (*date, *count))
    }

    /// Earliest date present.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Latest date present.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Month span covered by the entries.
    pub fn bucket_range(&self) -> Option<(MonthBucket, MonthBucket)> {
        Some((
            MonthBucket::from_date(self.first_date()?),
            MonthBucket::from_date(self.last_date()?),
        ))
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day is recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.days.values().fold(0, |acc, c| acc.saturating_add(*c))
    }
}

impl FromIterator<(NaiveDate, u64)> for DailyContribution {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, u64)>>(iter: T) -> Self {
        let mut daily = Self::new();
        for (date, count) in iter {
            daily.insert(date, count);
        }
        daily
    }
}

impl From<BTreeMap<NaiveDate, u64>> for DailyContribution {
    fn from(days: BTreeMap<NaiveDate, u64>) -> Self {
        Self { days }
    }
}
