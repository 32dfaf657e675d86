//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use trialview_shared::AppError;

/// Boxed failure raised by a [`super::TrialBalanceSource`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A filter value could not be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Row skeleton and snapshot folder disagree.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    /// The backing store failed; the original error is kept as the source.
    #[error("Data source error: {0}")]
    DataSource(#[source] SourceError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidInput(_) | ReportError::InvalidDateRange { .. } => {
                Self::Validation(err.to_string())
            }
            ReportError::Invariant(_) => Self::Internal(err.to_string()),
            ReportError::DataSource(source) => Self::Database(source.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_400() {
        let err: AppError = ReportError::InvalidInput("from_date".into()).into();
        assert_eq!(err.status_code(), 400);

        let err: AppError = ReportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_source_errors_keep_their_message() {
        let err = ReportError::DataSource("connection reset".into());
        assert_eq!(err.to_string(), "Data source error: connection reset");

        let app: AppError = err.into();
        assert_eq!(app.to_string(), "Database error: connection reset");
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_invariant_is_internal() {
        let app: AppError = ReportError::Invariant("no header row for Revenue".into()).into();
        assert_eq!(app.error_code(), "INTERNAL_ERROR");
    }
}
