//! Fetch, aggregate and render in one run.

use crate::error::{AppError, AppResult};
use cgraph_common::Provider;
use cgraph_config::Config;
use cgraph_graphs::{
    assemble_chart, AssembleOptions, ChartData, ChartRenderer, ContributionStats,
    LineChartRenderer, RenderOptions, SourceData,
};
use cgraph_providers::{sources_from_config, FetchWindow, ProviderReport, SharedSource};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Aggregated chart data
    pub chart: ChartData,
    /// Per-provider totals
    pub stats: ContributionStats,
    /// Rendered chart file, `None` on dry runs or when rendering is disabled
    pub output: Option<PathBuf>,
    /// Providers that failed and were left out
    pub failed: Vec<Provider>,
}

/// The contrib-graph application.
pub struct ContribGraphApp {
    config: Config,
    sources: Vec<SharedSource>,
    renderer: Arc<dyn ChartRenderer>,
    dry_run: bool,
}

impl std::fmt::Debug for ContribGraphApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContribGraphApp")
            .field("sources", &self.sources.iter().map(|s| s.provider()).collect::<Vec<_>>())
            .field("renderer", &self.renderer.name())
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl ContribGraphApp {
    /// Builds the sources the configuration asks for.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let sources = sources_from_config(&config)?;
        Ok(Self::with_sources(config, sources))
    }

    /// Uses the given sources instead of the configured ones.
    pub fn with_sources(config: Config, sources: Vec<SharedSource>) -> Self {
        Self {
            config,
            sources,
            renderer: Arc::new(LineChartRenderer::new()),
            dry_run: false,
        }
    }

    /// Replaces the chart renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Skips rendering when set.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs with today's local date as the end of the window.
    pub async fn run(&self) -> AppResult<RunOutcome> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Runs with `today` as the end of the window.
    #[instrument(skip(self), fields(sources = self.sources.len(), dry_run = self.dry_run))]
    pub async fn run_on(&self, today: NaiveDate) -> AppResult<RunOutcome> {
        if self.sources.is_empty() {
            return Err(AppError::NoSources);
        }

        let window = FetchWindow::new(self.config.data.resolve_since(today), today)?;
        info!(since = %window.since, until = %window.until, "Fetching contributions");

        let (reports, failures) = self.fetch_all(window).await;
        if reports.is_empty() {
            return Err(AppError::AllProvidersFailed(failures));
        }
        let failed = failures.iter().map(|(provider, _)| *provider).collect();

        let stats: ContributionStats = reports.iter().filter_map(|r| r.stats).collect();
        let chart = self.assemble(reports, today)?;
        info!(
            months = chart.axis.len(),
            series = chart.series.len(),
            peak = chart.max_value(),
            "Aggregated contributions"
        );

        let output = self.render(&chart)?;
        Ok(RunOutcome {
            chart,
            stats,
            output,
            failed,
        })
    }

    async fn fetch_all(
        &self,
        window: FetchWindow,
    ) -> (Vec<ProviderReport>, Vec<(Provider, String)>) {
        let results = join_all(self.sources.iter().map(|source| source.fetch(window))).await;

        let mut reports = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(provider = %source.provider(), error = %e, "Provider failed, skipping it");
                    failures.push((source.provider(), e.to_string()));
                }
            }
        }
        (reports, failures)
    }

    fn assemble(&self, reports: Vec<ProviderReport>, today: NaiveDate) -> AppResult<ChartData> {
        let styles = &self.config.chart.series;
        let sources: Vec<SourceData> = reports
            .into_iter()
            .map(|report| SourceData::new(styles.for_provider(report.provider).clone(), report.daily))
            .collect();

        let options = AssembleOptions {
            combined: self
                .config
                .chart
                .show_combined
                .then(|| styles.combined.clone()),
            since: self.config.data.clip_date(today),
        };
        Ok(assemble_chart(&sources, &options)?)
    }

    fn render(&self, chart: &ChartData) -> AppResult<Option<PathBuf>> {
        if self.dry_run {
            debug!("Dry run, not rendering");
            return Ok(None);
        }
        if !self.config.chart.enabled {
            debug!("Chart rendering disabled");
            return Ok(None);
        }

        let path = self.config.chart.output.clone();
        self.renderer
            .render_to_file(chart, &RenderOptions::from(&self.config.chart), &path)?;
        Ok(Some(path))
    }
}
