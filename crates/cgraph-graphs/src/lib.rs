//! # cgraph Graphs
//!
//! Monthly contribution aggregation and chart rendering for contrib-graph.
//!
//! The aggregation engine turns sparse per-day contribution maps from several
//! providers into one gap-free monthly axis with aligned series. It is pure
//! and synchronous. The renderer draws the result with plotters.
//!
//! ```
//! use cgraph_config::SeriesStylesConfig;
//! use cgraph_graphs::{assemble_chart, AssembleOptions, DailyContribution, SourceData};
//!
//! let styles = SeriesStylesConfig::default();
//! let daily = DailyContribution::parse([("2022-01-05", 2), ("2022-03-01", 1)]).unwrap();
//! let chart = assemble_chart(
//!     &[SourceData::new(styles.github, daily)],
//!     &AssembleOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(chart.axis.labels(), ["2022-01", "2022-02", "2022-03"]);
//! assert_eq!(chart.series[0].values, [2, 0, 1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod axis;
pub mod chart;
pub mod combiner;
pub mod daily;
pub mod date_key;
pub mod error;
pub mod renderer;
pub mod series;
pub mod stats;

pub use axis::{build_axis, Axis};
pub use chart::{assemble_chart, AssembleOptions, ChartData, SourceData};
pub use combiner::{combine, combine_series};
pub use daily::{DailyContribution, LossyParse};
pub use date_key::{format_date, parse_date, MonthBucket};
pub use error::{AggregateError, AggregateResult};
pub use renderer::{ChartRenderer, LineChartRenderer, OutputFormat, RenderOptions};
pub use series::{map_to_series, Series};
pub use stats::{format_stats, ContributionStats, GithubStats, GitlabStats, ProviderStats};
