//! Monthly totals aligned to an axis.

use crate::axis::Axis;
use crate::daily::DailyContribution;
use crate::date_key::MonthBucket;
use crate::error::{AggregateError, AggregateResult};
use cgraph_config::{LineStyle, SeriesStyle};
use serde::{Deserialize, Serialize};

/// A named line of monthly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label
    pub name: String,
    /// `#RRGGBB` color
    pub color: String,
    /// How the line is drawn
    pub line_style: LineStyle,
    /// One total per axis bucket
    pub values: Vec<u64>,
}

impl Series {
    /// Creates a series from a style and its values.
    pub fn new(style: &SeriesStyle, values: Vec<u64>) -> Self {
        Self {
            name: style.name.clone(),
            color: style.color.clone(),
            line_style: style.line_style,
            values,
        }
    }

    /// Largest monthly total.
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all monthly totals.
    pub fn total(&self) -> u64 {
        self.values.iter().fold(0, |acc, v| acc.saturating_add(*v))
    }

    /// Fails unless the series has one value per axis bucket.
    pub fn check_aligned(&self, axis: &Axis) -> AggregateResult<()> {
        if self.values.len() != axis.len() {
            return Err(AggregateError::SeriesLengthMismatch {
                name: self.name.clone(),
                expected: axis.len(),
                actual: self.values.len(),
            });
        }
        Ok(())
    }
}

/// Sums `daily` into monthly totals aligned to `axis`.
///
/// Months without contributions are zero. A day whose month is not on the
/// axis fails with [`AggregateError::OutsideAxis`].
pub fn map_to_series(
    axis: &Axis,
    daily: &DailyContribution,
    style: &SeriesStyle,
) -> AggregateResult<Series> {
    let mut values = vec![0u64; axis.len()];
    for (date, count) in daily.iter() {
        let bucket = MonthBucket::from_date(date);
        let index = axis
            .position(bucket)
            .ok_or(AggregateError::OutsideAxis { bucket })?;
        values[index] = values[index].saturating_add(count);
    }
    Ok(Series::new(style, values))
}
