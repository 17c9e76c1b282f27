//! Summing several sources into one.

use crate::axis::Axis;
use crate::daily::DailyContribution;
use crate::error::AggregateResult;
use crate::series::Series;
use cgraph_config::SeriesStyle;

/// Sums daily maps date by date; a date absent from a map contributes zero.
pub fn combine<'a, I>(maps: I) -> DailyContribution
where
    I: IntoIterator<Item = &'a DailyContribution>,
{
    maps.into_iter().flat_map(DailyContribution::iter).collect()
}

/// Sums series aligned to `axis` position by position.
///
/// Every input must have exactly one value per axis bucket.
pub fn combine_series<'a, I>(axis: &Axis, series: I, style: &SeriesStyle) -> AggregateResult<Series>
where
    I: IntoIterator<Item = &'a Series>,
{
    let mut values = vec![0u64; axis.len()];
    for s in series {
        s.check_aligned(axis)?;
        for (total, value) in values.iter_mut().zip(&s.values) {
            *total = total.saturating_add(*value);
        }
    }
    Ok(Series::new(style, values))
}
