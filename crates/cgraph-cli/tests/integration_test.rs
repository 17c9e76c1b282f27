//! Integration tests for cgraph-cli crate.
//!
//! These run the whole pipeline against the recorded provider responses
//! shipped in the repository's `fixtures/` directory.

use cgraph_cli::{AppError, Cli, ContribGraphApp};
use cgraph_common::test_utils::{create_temp_dir, init_test_logging, mock_date};
use cgraph_common::{CGraphError, Provider, Result as CGraphResult};
use cgraph_config::{Config, SourceMode};
use cgraph_graphs::{format_stats, ChartData, ChartRenderer, RenderOptions};
use cgraph_providers::{ContributionSource, FetchWindow, MockContributionSource, ProviderReport};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn fixture_config() -> Config {
    let mut config = Config::default();
    config.data.mode = SourceMode::Fixture;
    config.data.fixture_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures");
    config
}

/// Records render calls instead of drawing.
#[derive(Default)]
struct RecordingRenderer {
    calls: Mutex<Vec<(PathBuf, usize)>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render_to_file(
        &self,
        chart: &ChartData,
        _options: &RenderOptions,
        path: &Path,
    ) -> CGraphResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), chart.series.len()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn test_fixture_pipeline() {
    init_test_logging();
    let config = fixture_config();
    assert!(config.validate().is_ok());

    let outcome = ContribGraphApp::from_config(config)
        .unwrap()
        .dry_run(true)
        .run_on(mock_date(2022, 6, 1))
        .await
        .unwrap();

    assert_eq!(
        outcome.chart.axis.labels(),
        vec!["2021-11", "2021-12", "2022-01", "2022-02", "2022-03"]
    );
    let values = |name: &str| outcome.chart.series_named(name).unwrap().values.clone();
    assert_eq!(values("GitHub"), vec![5, 5, 5, 3, 0]);
    assert_eq!(values("GitLab"), vec![0, 4, 6, 0, 2]);
    assert_eq!(values("Combined"), vec![5, 9, 11, 3, 2]);

    let report = format_stats(&outcome.stats);
    assert!(report.contains("Contributions on GitHub: 18"));
    assert!(report.contains("Contributions on GitLab: 0"));
    assert_eq!(outcome.output, None);
}

#[tokio::test]
async fn test_renders_to_configured_output() {
    let dir = create_temp_dir();
    let output = dir.path().join("chart.svg");
    let cli = Cli::try_parse_from([
        "contrib-graph",
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let mut config = fixture_config();
    cli.apply_to(&mut config);

    let renderer = Arc::new(RecordingRenderer::default());
    let outcome = ContribGraphApp::from_config(config)
        .unwrap()
        .with_renderer(renderer.clone())
        .run_on(mock_date(2022, 6, 1))
        .await
        .unwrap();

    assert_eq!(outcome.output, Some(output.clone()));
    assert_eq!(*renderer.calls.lock().unwrap(), vec![(output, 3)]);
}

#[tokio::test]
async fn test_disabled_chart_is_not_rendered() {
    let mut config = fixture_config();
    config.chart.enabled = false;

    let renderer = Arc::new(RecordingRenderer::default());
    let outcome = ContribGraphApp::from_config(config)
        .unwrap()
        .with_renderer(renderer.clone())
        .run_on(mock_date(2022, 6, 1))
        .await
        .unwrap();

    assert_eq!(outcome.output, None);
    assert!(renderer.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_fixture_dir_fails_every_provider() {
    let dir = create_temp_dir();
    let mut config = fixture_config();
    config.data.fixture_dir = dir.path().to_path_buf();

    let err = ContribGraphApp::from_config(config)
        .unwrap()
        .dry_run(true)
        .run_on(mock_date(2022, 6, 1))
        .await
        .unwrap_err();

    match err {
        AppError::AllProvidersFailed(failures) => {
            let providers: Vec<Provider> = failures.iter().map(|(p, _)| *p).collect();
            assert_eq!(providers, vec![Provider::GitHub, Provider::GitLab]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_window_passed_to_sources() {
    let mut config = Config::default();
    config.data.since = Some(mock_date(2022, 1, 1));

    let mut mock = MockContributionSource::new();
    mock.expect_provider().return_const(Provider::GitLab);
    mock.expect_fetch()
        .withf(|window: &FetchWindow| {
            window.since == mock_date(2022, 1, 1) && window.until == mock_date(2022, 6, 1)
        })
        .times(1)
        .returning(|_| Ok(ProviderReport::from_raw(Provider::GitLab, [("2022-01-02", 1)], None)));
    let sources: Vec<Arc<dyn ContributionSource>> = vec![Arc::new(mock)];

    let outcome = ContribGraphApp::with_sources(config, sources)
        .dry_run(true)
        .run_on(mock_date(2022, 6, 1))
        .await
        .unwrap();
    assert_eq!(outcome.chart.axis.labels(), vec!["2022-01"]);
}

#[test]
fn test_error_conversion() {
    let err: AppError = CGraphError::validation("bad").into();
    assert!(err.to_string().contains("bad"));
}
