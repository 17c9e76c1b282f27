//! Application-wide error types using thiserror.

use cgraph_common::{CGraphError, Provider};
use cgraph_graphs::AggregateError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, provider, I/O or rendering error.
    #[error(transparent)]
    Core(#[from] CGraphError),

    /// The fetched data could not be turned into a chart.
    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    /// No provider is enabled.
    #[error("No contribution sources configured")]
    NoSources,

    /// Every provider failed to report.
    #[error("Every provider failed: {}", format_failures(.0))]
    AllProvidersFailed(Vec<(Provider, String)>),
}

fn format_failures(failures: &[(Provider, String)]) -> String {
    failures
        .iter()
        .map(|(provider, message)| format!("{}: {}", provider, message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
