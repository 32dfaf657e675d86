//! Report-viewer metadata: filter definitions, defaults and tree hints.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::filters::DATE_FORMAT;
use super::variant::{ReportName, STATEMENT_OPTIONS};

/// Look-back window of the Custom PnL Report's default range.
const CUSTOM_PNL_LOOKBACK_DAYS: u64 = 90;

/// Statement preselected on the Financial Accounting Reports page.
const DEFAULT_STATEMENT: &str = "Balance Sheet";

/// Field type of a filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterType {
    /// Date picker.
    Date,
    /// Drop-down.
    Select,
}

/// One filter input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Query parameter name.
    pub fieldname: &'static str,
    /// Input label.
    pub label: &'static str,
    /// Input type.
    pub fieldtype: FilterType,
    /// Input width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<&'static str>,
    /// Whether a value is required.
    pub reqd: bool,
    /// Choices of a `Select`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    /// Preset value.
    pub default: String,
}

/// Everything the viewer needs to render a report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportViewerSpec {
    /// Report title.
    pub name: &'static str,
    /// Depth the tree opens at.
    pub initial_depth: u8,
    /// Row field naming tree nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_field: Option<&'static str>,
    /// Row field naming the parent node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_field: Option<&'static str>,
    /// Filter inputs.
    pub filters: Vec<FilterSpec>,
}

impl ReportName {
    /// Default `(from_date, to_date)` relative to `today`.
    #[must_use]
    pub fn default_range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::FinancialAccountingReports | Self::DeltaReport => (
                today.with_ordinal(1).unwrap_or(today),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
            ),
            Self::CustomPnlReport => (
                today
                    .checked_sub_days(Days::new(CUSTOM_PNL_LOOKBACK_DAYS))
                    .unwrap_or(today),
                today,
            ),
        }
    }

    /// Viewer metadata with defaults computed for `today`.
    #[must_use]
    pub fn viewer_spec(self, today: NaiveDate) -> ReportViewerSpec {
        let (from, to) = self.default_range(today);
        let mut filters = vec![
            date_filter("from_date", "From Date", from),
            date_filter("to_date", "To Date", to),
        ];

        let (name_field, parent_field) = match self {
            Self::FinancialAccountingReports => {
                filters.push(FilterSpec {
                    fieldname: "report",
                    label: "Report",
                    fieldtype: FilterType::Select,
                    width: None,
                    reqd: true,
                    options: STATEMENT_OPTIONS.to_vec(),
                    default: DEFAULT_STATEMENT.to_string(),
                });
                (Some("ledger_code"), Some("group"))
            }
            Self::DeltaReport | Self::CustomPnlReport => (None, None),
        };

        ReportViewerSpec {
            name: self.title(),
            initial_depth: 0,
            name_field,
            parent_field,
            filters,
        }
    }
}

fn date_filter(fieldname: &'static str, label: &'static str, default: NaiveDate) -> FilterSpec {
    FilterSpec {
        fieldname,
        label,
        fieldtype: FilterType::Date,
        width: Some("80"),
        reqd: true,
        options: Vec::new(),
        default: default.format(DATE_FORMAT).to_string(),
    }
}
