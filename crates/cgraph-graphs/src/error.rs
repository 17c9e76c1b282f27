//! Errors raised by the aggregation engine.

use crate::date_key::MonthBucket;
use cgraph_common::CGraphError;
use thiserror::Error;

/// Result type alias for aggregation operations
pub type AggregateResult<T> = std::result::Result<T, AggregateError>;

/// Failures of axis construction and series mapping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// No dates to anchor an axis
    #[error("no contribution dates to build an axis from")]
    EmptyInput,

    /// A date key does not match `YYYY-MM-DD`
    #[error("malformed date key '{key}', expected YYYY-MM-DD")]
    MalformedDate {
        /// Offending key as received
        key: String,
    },

    /// A contribution falls in a month the axis does not cover
    #[error("month {bucket} lies outside the axis")]
    OutsideAxis {
        /// Month that could not be placed
        bucket: MonthBucket,
    },

    /// Axis span requested with its end before its start
    #[error("axis end {end} is before start {start}")]
    InvertedRange {
        /// Requested first month
        start: MonthBucket,
        /// Requested last month
        end: MonthBucket,
    },

    /// Consecutive axis months are not one month apart
    #[error("axis jumps from {previous} to {next}, expected consecutive months")]
    AxisGap {
        /// Month before the break
        previous: MonthBucket,
        /// Month after the break
        next: MonthBucket,
    },

    /// A series is not aligned to the axis it is combined over
    #[error("series '{name}' has {actual} values, axis has {expected}")]
    SeriesLengthMismatch {
        /// Series name
        name: String,
        /// Axis length
        expected: usize,
        /// Series length
        actual: usize,
    },
}

impl From<AggregateError> for CGraphError {
    fn from(err: AggregateError) -> Self {
        CGraphError::aggregation_with_source("Failed to aggregate contributions", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AggregateError::MalformedDate {
            key: "2022/01/05".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed date key '2022/01/05', expected YYYY-MM-DD"
        );

        let err = AggregateError::InvertedRange {
            start: MonthBucket::new(2022, 3).unwrap(),
            end: MonthBucket::new(2022, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "axis end 2022-01 is before start 2022-03");

        let err = AggregateError::AxisGap {
            previous: MonthBucket::new(2022, 1).unwrap(),
            next: MonthBucket::new(2022, 3).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "axis jumps from 2022-01 to 2022-03, expected consecutive months"
        );
    }

    #[test]
    fn test_converts_into_workspace_error() {
        let err: CGraphError = AggregateError::EmptyInput.into();
        assert!(matches!(err, CGraphError::Aggregation { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
