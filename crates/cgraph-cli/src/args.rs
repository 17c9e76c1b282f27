//! Command line arguments.

use cgraph_common::parse_iso_date;
use cgraph_config::{Config, SourceMode, CONFIG_PATH_ENV};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = "contrib-graph",
    author,
    version,
    about = "Plot monthly GitHub and GitLab contributions as one line chart",
    long_about = None
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// First day to collect, YYYY-MM-DD
    #[arg(long, value_parser = parse_since)]
    pub since: Option<NaiveDate>,

    /// Read recorded responses instead of calling the APIs
    #[arg(
        long,
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = "fixtures"
    )]
    pub fixtures: Option<PathBuf>,

    /// GitHub login
    #[arg(long)]
    pub github_user: Option<String>,

    /// GitHub personal access token
    #[arg(long)]
    pub github_token: Option<String>,

    /// GitLab username
    #[arg(long)]
    pub gitlab_user: Option<String>,

    /// GitLab personal access token
    #[arg(long)]
    pub gitlab_token: Option<String>,

    /// Chart output file (.png or .svg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Drop contributions dated before --since
    #[arg(long)]
    pub clip_to_since: bool,

    /// Print the chart data as JSON instead of rendering it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_since(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Applies the arguments on top of file and environment configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(user) = &self.github_user {
            config.github.user.clone_from(user);
        }
        if let Some(token) = &self.github_token {
            config.github.token.clone_from(token);
        }
        if let Some(user) = &self.gitlab_user {
            config.gitlab.user.clone_from(user);
        }
        if let Some(token) = &self.gitlab_token {
            config.gitlab.token.clone_from(token);
        }
        if let Some(since) = self.since {
            config.data.since = Some(since);
        }
        if let Some(dir) = &self.fixtures {
            config.data.mode = SourceMode::Fixture;
            config.data.fixture_dir.clone_from(dir);
        }
        if self.clip_to_since {
            config.data.clip_to_since = true;
        }
        if let Some(output) = &self.output {
            config.chart.output.clone_from(output);
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("contrib-graph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fixtures_without_value() {
        let cli = parse(&["--fixtures"]);
        assert_eq!(cli.fixtures, Some(PathBuf::from("fixtures")));

        let cli = parse(&["--fixtures", "recorded"]);
        assert_eq!(cli.fixtures, Some(PathBuf::from("recorded")));
    }

    #[test]
    fn test_since_must_be_a_date() {
        let cli = parse(&["--since", "2022-01-01"]);
        assert_eq!(cli.since, NaiveDate::from_ymd_opt(2022, 1, 1));

        for value in ["01/01/2022", "2022-1-1", "+2022-01-01"] {
            assert!(Cli::try_parse_from(["contrib-graph", "--since", value]).is_err());
        }
    }

    #[test]
    fn test_apply_overrides_config() {
        let cli = parse(&[
            "--github-user",
            "octocat",
            "--gitlab-token",
            "glpat",
            "--since",
            "2022-03-01",
            "--fixtures",
            "--clip-to-since",
            "--output",
            "chart.svg",
            "--verbose",
        ]);
        let mut config = Config::default();
        config.gitlab.user = "from-file".to_string();
        cli.apply_to(&mut config);

        assert_eq!(config.github.user, "octocat");
        assert_eq!(config.gitlab.user, "from-file");
        assert_eq!(config.gitlab.token, "glpat");
        assert_eq!(config.data.since, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(config.data.mode, SourceMode::Fixture);
        assert_eq!(config.data.fixture_dir, PathBuf::from("fixtures"));
        assert!(config.data.clip_to_since);
        assert_eq!(config.chart.output, PathBuf::from("chart.svg"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_no_arguments_leave_config_untouched() {
        let mut config = Config::default();
        Cli::default().apply_to(&mut config);
        assert_eq!(config, Config::default());
    }
}
