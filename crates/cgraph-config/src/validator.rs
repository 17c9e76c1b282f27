//! Runtime validation of a loaded configuration.

use crate::schema::{Config, SeriesStyle, SourceMode};
use cgraph_common::{parse_hex_color, CGraphError};
use std::ops::RangeInclusive;

const DIMENSION_RANGE: RangeInclusive<u32> = 100..=4000;
const LOOKBACK_RANGE: RangeInclusive<u32> = 1..=3650;
const TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<(), CGraphError> {
        if config.enabled_providers().is_empty() {
            return Err(CGraphError::validation(
                "At least one provider must be enabled",
            ));
        }

        if config.data.mode == SourceMode::Live {
            Self::validate_live_credentials(config)?;
        }

        if config.github.enabled {
            validate_range("github.timeout_seconds", config.github.timeout_seconds, &TIMEOUT_RANGE)?;
            validate_non_zero("github.rate_limit_per_sec", config.github.rate_limit_per_sec)?;
        }
        if config.gitlab.enabled {
            validate_range("gitlab.timeout_seconds", config.gitlab.timeout_seconds, &TIMEOUT_RANGE)?;
            validate_non_zero("gitlab.rate_limit_per_sec", config.gitlab.rate_limit_per_sec)?;
        }

        validate_range("data.lookback_days", config.data.lookback_days, &LOOKBACK_RANGE)?;
        validate_range("chart.width", config.chart.width, &DIMENSION_RANGE)?;
        validate_range("chart.height", config.chart.height, &DIMENSION_RANGE)?;
        validate_hex_color("chart.background", &config.chart.background)?;

        validate_series_style("chart.series.github", &config.chart.series.github)?;
        validate_series_style("chart.series.gitlab", &config.chart.series.gitlab)?;
        validate_series_style("chart.series.combined", &config.chart.series.combined)?;

        Ok(())
    }

    fn validate_live_credentials(config: &Config) -> Result<(), CGraphError> {
        if config.github.enabled {
            validate_not_empty("github.user", &config.github.user)?;
            // The GraphQL API rejects anonymous requests.
            validate_not_empty("github.token", &config.github.token)?;
        }
        if config.gitlab.enabled {
            validate_not_empty("gitlab.user", &config.gitlab.user)?;
        }
        Ok(())
    }
}

/// Rejects empty or whitespace-only values.
pub fn validate_not_empty(field: &str, value: &str) -> Result<(), CGraphError> {
    if value.trim().is_empty() {
        return Err(CGraphError::validation_field(
            format!("{} cannot be empty", field),
            field,
        ));
    }
    Ok(())
}

/// Rejects colors that are not `#RRGGBB`.
pub fn validate_hex_color(field: &str, value: &str) -> Result<(), CGraphError> {
    if parse_hex_color(value).is_none() {
        return Err(CGraphError::validation_field(
            format!("{} must be a #RRGGBB color, got '{}'", field, value),
            field,
        ));
    }
    Ok(())
}

fn validate_range<T>(field: &str, value: T, range: &RangeInclusive<T>) -> Result<(), CGraphError>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(CGraphError::validation_field(
            format!(
                "{} must be between {} and {}, got {}",
                field,
                range.start(),
                range.end(),
                value
            ),
            field,
        ));
    }
    Ok(())
}

fn validate_non_zero(field: &str, value: u32) -> Result<(), CGraphError> {
    if value == 0 {
        return Err(CGraphError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

fn validate_series_style(field: &str, style: &SeriesStyle) -> Result<(), CGraphError> {
    validate_not_empty(&format!("{}.name", field), &style.name)?;
    validate_hex_color(&format!("{}.color", field), &style.color)
}
