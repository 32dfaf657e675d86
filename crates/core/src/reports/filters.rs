//! Report filters as supplied by the host.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Input date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to_date: Option<String>,
    /// Statement selector of the Financial Accounting Reports.
    pub report: Option<String>,
}

impl ReportFilters {
    /// Filters for a date range.
    #[must_use]
    pub fn between(from_date: &str, to_date: &str) -> Self {
        Self {
            from_date: Some(from_date.to_string()),
            to_date: Some(to_date.to_string()),
            report: None,
        }
    }

    /// Sets the statement selector.
    #[must_use]
    pub fn with_report(mut self, report: &str) -> Self {
        self.report = Some(report.to_string());
        self
    }

    /// Returns true when no filter carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.from_date, &self.to_date, &self.report]
            .iter()
            .all(|v| v.as_deref().is_none_or(|s| s.trim().is_empty()))
    }

    /// Parses the date bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unparsable dates and `InvalidDateRange`
    /// when the start is after the end.
    pub fn date_range(&self) -> Result<DateRange, ReportError> {
        let from = parse_bound("from_date", self.from_date.as_deref())?;
        let to = parse_bound("to_date", self.to_date.as_deref())?;
        DateRange::new(from, to)
    }
}

fn parse_bound(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ReportError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| ReportError::InvalidInput(format!("{field} '{s}': {e}"))),
    }
}

/// Inclusive date range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when both bounds are set and `from > to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, ReportError> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(ReportError::InvalidDateRange { start, end });
            }
        }
        Ok(Self { from, to })
    }

    /// A range without bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_filters_are_empty() {
        assert!(ReportFilters::default().is_empty());
        assert!(
            ReportFilters {
                from_date: Some(String::new()),
                ..ReportFilters::default()
            }
            .is_empty()
        );
        assert!(!ReportFilters::default().with_report("Balance Sheet").is_empty());
    }

    #[test]
    fn test_parse_range() {
        let range = ReportFilters::between("2024-01-01", "2024-12-31")
            .date_range()
            .unwrap();
        assert_eq!(range.from, Some(date(2024, 1, 1)));
        assert_eq!(range.to, Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_open_bounds() {
        let filters = ReportFilters {
            to_date: Some("2024-06-30".into()),
            ..ReportFilters::default()
        };
        let range = filters.date_range().unwrap();
        assert_eq!(range.from, None);
        assert!(range.contains(date(1999, 1, 1)));
        assert!(range.contains(date(2024, 6, 30)));
        assert!(!range.contains(date(2024, 7, 1)));
    }

    #[rstest]
    #[case("31-01-2024")]
    #[case("2024-02-30")]
    #[case("yesterday")]
    fn test_malformed_date_is_invalid_input(#[case] raw: &str) {
        let err = ReportFilters::between(raw, "2024-12-31")
            .date_range()
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(ref msg) if msg.starts_with("from_date")));
    }

    #[test]
    fn test_reversed_range() {
        let err = ReportFilters::between("2024-12-31", "2024-01-01")
            .date_range()
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(Some(date(2024, 3, 31)), Some(date(2024, 3, 31))).unwrap();
        assert!(range.contains(date(2024, 3, 31)));
        assert!(!range.contains(date(2024, 4, 1)));
        assert!(DateRange::unbounded().contains(date(2024, 4, 1)));
    }
}
