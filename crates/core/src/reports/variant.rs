//! Report variants.
//!
//! Every report shares one pivot algorithm; a [`ReportConfig`] captures the
//! few things that differ between them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::types::{ChartType, LedgerGroup, SeriesKind};

/// Transformation from accumulated raw totals to presented totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Credit-normal groups (Revenue, Expense) are shown negated.
    Inverted,
    /// Totals are shown as accumulated.
    AsIs,
}

impl SignConvention {
    /// Applies the convention to a raw total.
    #[must_use]
    pub fn present(self, raw: Decimal) -> Decimal {
        match self {
            Self::Inverted => -raw,
            Self::AsIs => raw,
        }
    }
}

/// Numeric precision a variant reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePrecision {
    /// Whole units: chart values truncated, summary without decimals.
    Integer,
    /// Raw values: summary with two decimals.
    Float,
}

impl ValuePrecision {
    /// Coerces a value for the chart layer.
    #[must_use]
    pub fn chart_value(self, value: Decimal) -> Decimal {
        match self {
            Self::Integer => value.trunc(),
            Self::Float => value,
        }
    }

    /// Decimal places of the formatted summary value.
    #[must_use]
    pub const fn summary_decimals(self) -> u32 {
        match self {
            Self::Integer => 0,
            Self::Float => 2,
        }
    }

    /// Display precision attached to snapshot columns.
    #[must_use]
    pub const fn column_precision(self) -> Option<&'static str> {
        match self {
            Self::Integer => Some("0"),
            Self::Float => None,
        }
    }
}

/// Which value of the combined series the summary reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryBasis {
    /// Sum over all snapshots (flow statements).
    Sum,
    /// Latest snapshot (position statements).
    Last,
}

/// Parameters of one report variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Groups in scope, in display order.
    pub groups: [LedgerGroup; 2],
    /// Sign convention applied to group totals.
    pub sign: SignConvention,
    /// Numeric precision.
    pub precision: ValuePrecision,
    /// Label of the derived combination row, if the table shows one.
    pub combined_row: Option<&'static str>,
    /// Chart kind.
    pub chart_type: ChartType,
    /// Chart series names: first group, second group, combination.
    pub series_names: [&'static str; 3],
    /// Drawing kind of the combination series.
    pub combined_series_kind: SeriesKind,
    /// Summary label.
    pub summary_label: &'static str,
    /// Summary basis.
    pub summary_basis: SummaryBasis,
    /// Trailing renderer hint.
    pub add_total_row: Option<bool>,
}

impl ReportConfig {
    /// Profit and Loss Statement of the Financial Accounting Reports.
    #[must_use]
    pub const fn profit_and_loss() -> Self {
        Self {
            groups: [LedgerGroup::Revenue, LedgerGroup::Expense],
            sign: SignConvention::Inverted,
            precision: ValuePrecision::Integer,
            combined_row: Some("Profit/Loss"),
            chart_type: ChartType::AxisMixed,
            series_names: ["Revenue", "Expense", "Profit/Loss"],
            combined_series_kind: SeriesKind::Line,
            summary_label: "Duration Profit/Loss",
            summary_basis: SummaryBasis::Sum,
            add_total_row: Some(true),
        }
    }

    /// Balance Sheet of the Financial Accounting Reports.
    #[must_use]
    pub const fn balance_sheet() -> Self {
        Self {
            groups: [LedgerGroup::Asset, LedgerGroup::Liability],
            sign: SignConvention::AsIs,
            precision: ValuePrecision::Integer,
            combined_row: Some("Retained Earnings"),
            chart_type: ChartType::Bar,
            series_names: ["Assets", "Liability", "retained"],
            combined_series_kind: SeriesKind::Bar,
            summary_label: "Retained Earning",
            summary_basis: SummaryBasis::Last,
            add_total_row: None,
        }
    }

    /// Delta Report: balance-sheet groups in raw precision, no combined row.
    #[must_use]
    pub const fn delta() -> Self {
        Self {
            precision: ValuePrecision::Float,
            combined_row: None,
            ..Self::balance_sheet()
        }
    }

    /// Custom PnL Report: P&L groups in raw precision, bar chart, no combined row.
    #[must_use]
    pub const fn custom_profit_and_loss() -> Self {
        Self {
            precision: ValuePrecision::Float,
            combined_row: None,
            chart_type: ChartType::Bar,
            combined_series_kind: SeriesKind::Bar,
            add_total_row: None,
            ..Self::profit_and_loss()
        }
    }

    /// Position of a group in `groups`.
    #[must_use]
    pub fn slot_of(&self, group: LedgerGroup) -> Option<usize> {
        self.groups.iter().position(|g| *g == group)
    }
}

/// Concrete report computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Profit and Loss Statement.
    ProfitAndLoss,
    /// Balance Sheet.
    BalanceSheet,
    /// Cash Flow; not computed.
    CashFlow,
    /// Delta Report.
    Delta,
    /// Custom PnL Report.
    CustomProfitAndLoss,
}

impl ReportKind {
    /// Returns the variant parameters, or `None` for the cash-flow stub.
    #[must_use]
    pub const fn config(self) -> Option<ReportConfig> {
        match self {
            Self::ProfitAndLoss => Some(ReportConfig::profit_and_loss()),
            Self::BalanceSheet => Some(ReportConfig::balance_sheet()),
            Self::CashFlow => None,
            Self::Delta => Some(ReportConfig::delta()),
            Self::CustomProfitAndLoss => Some(ReportConfig::custom_profit_and_loss()),
        }
    }
}

/// Statements selectable through the `report` filter.
pub const STATEMENT_OPTIONS: [&str; 3] =
    ["Profit and Loss Statement", "Balance Sheet", "Cash Flow"];

/// Parses the `report` filter of the Financial Accounting Reports.
///
/// # Errors
///
/// Returns `InvalidInput` for anything but the three statement names.
pub fn parse_statement(selector: &str) -> Result<ReportKind, ReportError> {
    match selector {
        "Profit and Loss Statement" => Ok(ReportKind::ProfitAndLoss),
        "Balance Sheet" => Ok(ReportKind::BalanceSheet),
        "Cash Flow" => Ok(ReportKind::CashFlow),
        other => Err(ReportError::InvalidInput(format!(
            "unknown report '{other}', expected one of: {}",
            STATEMENT_OPTIONS.join(", ")
        ))),
    }
}

/// Report page offered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportName {
    /// P&L, Balance Sheet or Cash Flow, chosen by the `report` filter.
    FinancialAccountingReports,
    /// Balance-sheet groups in raw precision.
    DeltaReport,
    /// P&L groups in raw precision.
    CustomPnlReport,
}

impl ReportName {
    /// All report pages.
    pub const ALL: [Self; 3] = [
        Self::FinancialAccountingReports,
        Self::DeltaReport,
        Self::CustomPnlReport,
    ];

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FinancialAccountingReports => "Financial Accounting Reports",
            Self::DeltaReport => "Delta Report",
            Self::CustomPnlReport => "Custom PnL Report",
        }
    }

    /// URL slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::FinancialAccountingReports => "financial-accounting-reports",
            Self::DeltaReport => "delta-report",
            Self::CustomPnlReport => "custom-pnl-report",
        }
    }

    /// Resolves the concrete report from the optional `report` filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the Financial Accounting Reports page gets
    /// no selector or an unknown one. Other pages ignore the selector.
    pub fn resolve_kind(self, selector: Option<&str>) -> Result<ReportKind, ReportError> {
        match self {
            Self::FinancialAccountingReports => match selector.map(str::trim) {
                Some(s) if !s.is_empty() => parse_statement(s),
                _ => Err(ReportError::InvalidInput("report is required".to_string())),
            },
            Self::DeltaReport => Ok(ReportKind::Delta),
            Self::CustomPnlReport => Ok(ReportKind::CustomProfitAndLoss),
        }
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ReportName {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.slug() == s || name.title() == s)
            .ok_or_else(|| ReportError::InvalidInput(format!("unknown report page '{s}'")))
    }
}
