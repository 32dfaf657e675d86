//! Report data types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Backing-store records
// ============================================================================

/// Taxonomy group a ledger belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LedgerGroup {
    /// Income accounts.
    Revenue,
    /// Cost accounts.
    Expense,
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
}

impl LedgerGroup {
    /// Returns the label used in the backing store and in report rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Expense => "Expense",
            Self::Asset => "Asset",
            Self::Liability => "Liability",
        }
    }
}

impl fmt::Display for LedgerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Revenue" => Ok(Self::Revenue),
            "Expense" => Ok(Self::Expense),
            "Asset" => Ok(Self::Asset),
            "Liability" => Ok(Self::Liability),
            other => Err(format!("Unknown ledger group: {other}")),
        }
    }
}

/// Master record of a ledger in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDefinition {
    /// Unique ledger code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Taxonomy group.
    pub group: LedgerGroup,
}

impl LedgerDefinition {
    /// Creates a ledger definition.
    pub fn new(code: impl Into<String>, name: impl Into<String>, group: LedgerGroup) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            group,
        }
    }
}

/// Header of one trial-balance snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Snapshot identifier in the backing store.
    pub id: Uuid,
    /// Date the balances were captured at.
    pub date: NaiveDate,
}

/// One ledger balance inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Ledger code the balance belongs to.
    pub ledger_code: String,
    /// Closing balance of the ledger at the snapshot date.
    pub balance: Decimal,
}

impl SnapshotEntry {
    /// Creates a snapshot entry.
    pub fn new(ledger_code: impl Into<String>, balance: Decimal) -> Self {
        Self {
            ledger_code: ledger_code.into(),
            balance,
        }
    }
}

// ============================================================================
// Table output
// ============================================================================

/// Field type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Plain text.
    Data,
    /// Reference to another record.
    Link,
    /// Numeric value.
    Float,
}

/// Column descriptor consumed by the report renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Header label.
    pub label: String,
    /// Key of the value in each row.
    #[serde(rename = "fieldname")]
    pub field_key: String,
    /// Field type.
    #[serde(rename = "fieldtype")]
    pub field_type: FieldType,
    /// Link target for `Link` columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Display width in pixels.
    pub width: u32,
    /// Display precision for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
}

/// One row of the pivoted table.
///
/// Leaf rows carry a ledger code; group headers and derived rows do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Taxonomy label, or the label of a derived row.
    pub group: String,
    /// Ledger code, absent on synthetic rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_code: Option<String>,
    /// Ledger name, absent on synthetic rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_name: Option<String>,
    /// Tree depth: 0 for synthetic rows, 1 for ledgers.
    pub indent: u8,
    /// Value per snapshot column key.
    #[serde(flatten)]
    pub values: BTreeMap<String, Decimal>,
}

impl ReportRow {
    /// Creates a synthetic row (group header or derived total).
    pub fn synthetic(label: impl Into<String>) -> Self {
        Self {
            group: label.into(),
            ledger_code: None,
            ledger_name: None,
            indent: 0,
            values: BTreeMap::new(),
        }
    }

    /// Creates a leaf row for a ledger.
    #[must_use]
    pub fn leaf(ledger: &LedgerDefinition) -> Self {
        Self {
            group: ledger.group.as_str().to_string(),
            ledger_code: Some(ledger.code.clone()),
            ledger_name: Some(ledger.name.clone()),
            indent: 1,
            values: BTreeMap::new(),
        }
    }

    /// Returns true for rows without a backing ledger.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.ledger_code.is_none()
    }

    /// Returns the value at a column key, if set.
    #[must_use]
    pub fn value(&self, column_key: &str) -> Option<Decimal> {
        self.values.get(column_key).copied()
    }
}

// ============================================================================
// Chart and summary output
// ============================================================================

/// Chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartType {
    /// All series drawn as bars.
    #[serde(rename = "bar")]
    Bar,
    /// Bars and lines on a shared axis.
    #[serde(rename = "axis-mixed")]
    AxisMixed,
}

/// How a single series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Bar series.
    Bar,
    /// Line series.
    Line,
}

/// Named chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// Legend name.
    pub name: String,
    /// One value per label.
    pub values: Vec<Decimal>,
    /// Drawing kind.
    #[serde(rename = "chartType")]
    pub kind: SeriesKind,
}

/// Labels and series of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// One label per snapshot.
    pub labels: Vec<String>,
    /// Series, each aligned with `labels`.
    pub datasets: Vec<ChartSeries>,
}

/// Chart descriptor consumed by the charting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDescriptor {
    /// Chart data.
    pub data: ChartData,
    /// Chart kind.
    #[serde(rename = "type")]
    pub chart_type: ChartType,
}

/// Summary indicator colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Indicator {
    /// Representative value is negative.
    Red,
    /// Representative value is zero or positive.
    Green,
    /// No snapshots, nothing to judge.
    Grey,
}

/// One entry of the report summary strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    /// Label.
    pub label: String,
    /// Formatted value, or `--` without data.
    pub value: String,
    /// Indicator colour.
    pub indicator: Indicator,
}

// ============================================================================
// Report result
// ============================================================================

/// Everything beyond columns and rows; absent for degenerate reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDetails {
    /// User-facing notice. Always `None` for now.
    pub message: Option<String>,
    /// Chart descriptor.
    pub chart: ChartDescriptor,
    /// Summary strip.
    #[serde(rename = "report_summary")]
    pub summary: Vec<SummaryItem>,
    /// Renderer hint to append a totals row to the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_total_row: Option<bool>,
}

/// Result of one report invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    /// Column schema.
    pub columns: Vec<ColumnSpec>,
    /// Pivoted rows.
    #[serde(rename = "result")]
    pub rows: Vec<ReportRow>,
    /// Message, chart and summary.
    #[serde(flatten)]
    pub details: Option<ReportDetails>,
}

impl ReportOutput {
    /// The `(columns=[], rows=[])` result.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            details: None,
        }
    }

    /// Returns true when there are no columns and no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Finds the synthetic row with the given label.
    #[must_use]
    pub fn synthetic_row(&self, label: &str) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|row| row.is_synthetic() && row.group == label)
    }

    /// Finds the leaf row for a ledger code.
    #[must_use]
    pub fn ledger_row(&self, code: &str) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|row| row.ledger_code.as_deref() == Some(code))
    }
}
