//! Chart assembly: one axis and one aligned series per source.

use crate::axis::{build_axis, Axis};
use crate::combiner::combine;
use crate::daily::DailyContribution;
use crate::error::AggregateResult;
use crate::series::{map_to_series, Series};
use cgraph_config::SeriesStyle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A labelled source of daily contributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceData {
    /// How the source's series is drawn
    pub style: SeriesStyle,
    /// The source's contributions
    pub daily: DailyContribution,
}

impl SourceData {
    /// Pairs a style with its contributions.
    pub fn new(style: SeriesStyle, daily: DailyContribution) -> Self {
        Self { style, daily }
    }
}

/// Options of [`assemble_chart`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Style of the combined series; no combined series when `None`
    pub combined: Option<SeriesStyle>,
    /// Drop contributions before this date prior to bucketing
    pub since: Option<NaiveDate>,
}

/// Axis plus series ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    /// Shared x-axis
    pub axis: Axis,
    /// Series aligned to `axis`, sources first then the combined series
    pub series: Vec<Series>,
}

impl ChartData {
    /// Largest value across all series.
    pub fn max_value(&self) -> u64 {
        self.series.iter().map(Series::max_value).max().unwrap_or(0)
    }

    /// Series by name.
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Pretty JSON of the axis and series.
    pub fn to_json_pretty(&self) -> cgraph_common::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the shared axis and one series per source.
///
/// When more than one source is given and a combined style is configured,
/// a final series summing all sources is appended.
#[instrument(skip_all, fields(sources = sources.len()))]
pub fn assemble_chart(
    sources: &[SourceData],
    options: &AssembleOptions,
) -> AggregateResult<ChartData> {
    let clipped: Vec<DailyContribution> = match options.since {
        Some(since) => sources.iter().map(|s| s.daily.since(since)).collect(),
        None => sources.iter().map(|s| s.daily.clone()).collect(),
    };

    let axis = build_axis(&clipped)?;
    debug!(start = %axis.start(), end = %axis.end(), months = axis.len(), "Built axis");

    let mut series = sources
        .iter()
        .zip(&clipped)
        .map(|(source, daily)| map_to_series(&axis, daily, &source.style))
        .collect::<AggregateResult<Vec<_>>>()?;

    if let Some(style) = options.combined.as_ref().filter(|_| sources.len() > 1) {
        series.push(map_to_series(&axis, &combine(&clipped), style)?);
    }

    Ok(ChartData { axis, series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AggregateError;
    use cgraph_config::{LineStyle, SeriesStylesConfig};

    fn source(style: &SeriesStyle, raw: &[(&str, u64)]) -> SourceData {
        SourceData::new(
            style.clone(),
            DailyContribution::parse(raw.iter().copied()).unwrap(),
        )
    }

    fn options() -> AssembleOptions {
        AssembleOptions {
            combined: Some(SeriesStylesConfig::default().combined),
            since: None,
        }
    }

    #[test]
    fn test_two_sources_with_combined() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![
            source(&styles.github, &[("2022-01-05", 2), ("2022-03-01", 1)]),
            source(&styles.gitlab, &[("2022-02-10", 4)]),
        ];
        let chart = assemble_chart(&sources, &options()).unwrap();

        assert_eq!(chart.axis.labels(), vec!["2022-01", "2022-02", "2022-03"]);
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].values, vec![2, 0, 1]);
        assert_eq!(chart.series[1].values, vec![0, 4, 0]);
        assert_eq!(chart.series[2].name, "Combined");
        assert_eq!(chart.series[2].line_style, LineStyle::Area);
        assert_eq!(chart.series[2].values, vec![2, 4, 1]);
        assert_eq!(chart.max_value(), 4);
    }

    #[test]
    fn test_single_source_has_no_combined() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![source(&styles.github, &[("2022-01-05", 2)])];
        let chart = assemble_chart(&sources, &options()).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert!(chart.series_named("Combined").is_none());
    }

    #[test]
    fn test_combined_disabled() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![
            source(&styles.github, &[("2022-01-05", 2)]),
            source(&styles.gitlab, &[("2022-01-06", 2)]),
        ];
        let chart = assemble_chart(&sources, &AssembleOptions::default()).unwrap();
        assert_eq!(chart.series.len(), 2);
    }

    #[test]
    fn test_since_clips_before_bucketing() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![source(
            &styles.github,
            &[("2021-10-01", 9), ("2022-01-05", 2), ("2022-02-01", 1)],
        )];
        let opts = AssembleOptions {
            since: NaiveDate::from_ymd_opt(2022, 1, 1),
            ..options()
        };
        let chart = assemble_chart(&sources, &opts).unwrap();
        assert_eq!(chart.axis.labels(), vec!["2022-01", "2022-02"]);
        assert_eq!(chart.series[0].values, vec![2, 1]);
    }

    #[test]
    fn test_everything_clipped_is_empty_input() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![source(&styles.github, &[("2021-10-01", 9)])];
        let opts = AssembleOptions {
            since: NaiveDate::from_ymd_opt(2022, 1, 1),
            ..options()
        };
        assert_eq!(assemble_chart(&sources, &opts), Err(AggregateError::EmptyInput));
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(
            assemble_chart(&[], &options()),
            Err(AggregateError::EmptyInput)
        );
    }

    #[test]
    fn test_json_shape() {
        let styles = SeriesStylesConfig::default();
        let sources = vec![source(&styles.github, &[("2022-01-05", 2)])];
        let chart = assemble_chart(&sources, &options()).unwrap();
        let json = serde_json::to_value(&chart).unwrap();

        assert!(chart.to_json_pretty().unwrap().contains("\"2022-01\""));
        assert_eq!(
            json,
            serde_json::json!({
                "axis": ["2022-01"],
                "series": [{
                    "name": "GitHub",
                    "color": "#1f77b4",
                    "line_style": "solid",
                    "values": [2]
                }]
            })
        );
    }
}
