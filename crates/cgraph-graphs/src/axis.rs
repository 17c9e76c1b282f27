//! Gap-free monthly x-axis shared by every series of a chart.

use crate::daily::DailyContribution;
use crate::date_key::MonthBucket;
use crate::error::{AggregateError, AggregateResult};
use serde::{Deserialize, Serialize};

/// Consecutive months, never empty.
///
/// Each bucket is exactly one calendar month after the previous one, so the
/// index of a bucket is its month distance from the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MonthBucket>", into = "Vec<MonthBucket>")]
pub struct Axis {
    buckets: Vec<MonthBucket>,
}

impl Axis {
    /// Axis covering `start..=end`.
    pub fn span(start: MonthBucket, end: MonthBucket) -> AggregateResult<Self> {
        if end < start {
            return Err(AggregateError::InvertedRange { start, end });
        }
        let mut buckets = Vec::new();
        let mut current = start;
        loop {
            buckets.push(current);
            if current == end {
                break;
            }
            current = current.succ();
        }
        Ok(Self { buckets })
    }

    /// First month.
    pub fn start(&self) -> MonthBucket {
        self.buckets[0]
    }

    /// Last month.
    pub fn end(&self) -> MonthBucket {
        self.buckets[self.buckets.len() - 1]
    }

    /// Number of months; at least one.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Index of `bucket`, computed from its month distance to the start.
    pub fn position(&self, bucket: MonthBucket) -> Option<usize> {
        let offset = usize::try_from(self.start().months_until(bucket)).ok()?;
        (offset < self.buckets.len()).then_some(offset)
    }

    /// Whether `bucket` lies on the axis.
    pub fn contains(&self, bucket: MonthBucket) -> bool {
        self.position(bucket).is_some()
    }

    /// Months in order.
    pub fn buckets(&self) -> &[MonthBucket] {
        &self.buckets
    }

    /// `YYYY-MM` labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(ToString::to_string).collect()
    }
}

impl TryFrom<Vec<MonthBucket>> for Axis {
    type Error = AggregateError;

    fn try_from(buckets: Vec<MonthBucket>) -> Result<Self, Self::Error> {
        let (Some(&start), Some(&end)) = (buckets.first(), buckets.last()) else {
            return Err(AggregateError::EmptyInput);
        };
        if end < start {
            return Err(AggregateError::InvertedRange { start, end });
        }
        if let Some(pair) = buckets.windows(2).find(|pair| pair[0].succ() != pair[1]) {
            return Err(AggregateError::AxisGap {
                previous: pair[0],
                next: pair[1],
            });
        }
        Ok(Self { buckets })
    }
}

impl From<Axis> for Vec<MonthBucket> {
    fn from(axis: Axis) -> Self {
        axis.buckets
    }
}

/// Builds the axis spanning the earliest to the latest date of all maps.
///
/// Fails with [`AggregateError::EmptyInput`] when every map is empty.
pub fn build_axis<'a, I>(maps: I) -> AggregateResult<Axis>
where
    I: IntoIterator<Item = &'a DailyContribution>,
{
    let (start, end) = maps
        .into_iter()
        .filter_map(DailyContribution::bucket_range)
        .reduce(|(lo, hi), (start, end)| (lo.min(start), hi.max(end)))
        .ok_or(AggregateError::EmptyInput)?;
    Axis::span(start, end)
}
