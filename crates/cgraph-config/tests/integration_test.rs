//! Integration tests for cgraph-config crate.

use cgraph_common::test_utils::{config_fixtures, create_temp_dir, mock_date};
use cgraph_common::{LogFormat, Provider};
use cgraph_config::{Config, ConfigFormat, ConfigLoader, LineStyle, SourceMode};
use std::path::PathBuf;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Live mode needs credentials
    assert!(config.validate().is_err());

    config.github.user = "octocat".to_string();
    config.github.token = "ghp_test".to_string();
    config.gitlab.user = "tanuki".to_string();

    assert!(config.validate().is_ok());
}

#[test]
fn test_full_yaml_config() {
    let config =
        ConfigLoader::parse_str(config_fixtures::full_config_yaml(), ConfigFormat::Yaml).unwrap();

    assert_eq!(config.github.user, "octocat");
    assert_eq!(config.gitlab.user, "tanuki");
    assert_eq!(config.data.since, Some(mock_date(2022, 1, 1)));
    assert!(config.data.clip_to_since);
    assert_eq!(config.chart.width, 1000);
    assert_eq!(config.chart.series.github.line_style, LineStyle::Dashed);
    assert_eq!(config.chart.series.combined.line_style, LineStyle::Area);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fixture_yaml_config_fills_defaults() {
    let config =
        ConfigLoader::parse_str(config_fixtures::fixture_config_yaml(), ConfigFormat::Yaml)
            .unwrap();

    assert_eq!(config.data.mode, SourceMode::Fixture);
    assert!(!config.chart.enabled);
    assert_eq!(config.chart.height, 600);
    assert_eq!(config.enabled_providers(), Provider::ALL.to_vec());
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_config() {
    let toml = r##"
[github]
enabled = false

[gitlab]
user = "tanuki"

[data]
since = "2021-11-30"

[chart]
output = "chart.svg"
background = "#000000"
"##;
    let config = ConfigLoader::parse_str(toml, ConfigFormat::Toml).unwrap();

    assert!(!config.github.enabled);
    assert_eq!(config.enabled_providers(), vec![Provider::GitLab]);
    assert_eq!(config.data.since, Some(mock_date(2021, 11, 30)));
    assert_eq!(config.chart.output, PathBuf::from("chart.svg"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_read_file_from_disk() {
    let dir = create_temp_dir();
    let path = dir.path().join("contrib-graph.yaml");
    std::fs::write(&path, config_fixtures::full_config_yaml()).unwrap();

    let config = ConfigLoader::read_file(&path).unwrap();
    assert_eq!(config.chart.title, "Contributions");

    let discovered = ConfigLoader::discover_in(None, dir.path(), |_| None);
    assert_eq!(discovered, Some(path));
}

#[test]
fn test_read_missing_file() {
    let dir = create_temp_dir();
    let result = ConfigLoader::read_file(dir.path().join("missing.yaml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_yaml_reports_error() {
    let result = ConfigLoader::parse_str("chart: [unclosed", ConfigFormat::Yaml);
    assert!(result.is_err());
}
