//! Folding snapshots into the pivoted table.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::ReportError;
use super::skeleton::RowSkeleton;
use super::types::{ColumnSpec, FieldType, ReportRow, SnapshotEntry, SnapshotHeader};
use super::variant::ReportConfig;

/// Width of every column except the ledger name.
const COLUMN_WIDTH: u32 = 180;

/// Width of the ledger name column.
const NAME_COLUMN_WIDTH: u32 = 260;

/// Doctype the ledger code column links to.
const LEDGER_LINK_TARGET: &str = "Trial Balance Ledgers";

/// Column key of a snapshot, `DD-MM-YYYY`.
#[must_use]
pub fn column_key(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// The three leading columns shared by every report.
#[must_use]
pub fn fixed_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec {
            label: "Group".to_string(),
            field_key: "group".to_string(),
            field_type: FieldType::Data,
            options: None,
            width: COLUMN_WIDTH,
            precision: None,
        },
        ColumnSpec {
            label: "Ledger Code".to_string(),
            field_key: "ledger_code".to_string(),
            field_type: FieldType::Link,
            options: Some(LEDGER_LINK_TARGET.to_string()),
            width: COLUMN_WIDTH,
            precision: None,
        },
        ColumnSpec {
            label: "Ledger Name".to_string(),
            field_key: "ledger_name".to_string(),
            field_type: FieldType::Data,
            options: None,
            width: NAME_COLUMN_WIDTH,
            precision: None,
        },
    ]
}

/// Per-snapshot aggregate series, already in presented sign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSeries {
    /// Column keys, one per folded snapshot.
    pub labels: Vec<String>,
    /// Totals of the first configured group.
    pub first: Vec<Decimal>,
    /// Totals of the second configured group.
    pub second: Vec<Decimal>,
    /// Derived combination of both totals.
    pub combined: Vec<Decimal>,
}

impl AggregateSeries {
    fn pop(&mut self) {
        self.labels.pop();
        self.first.pop();
        self.second.pop();
        self.combined.pop();
    }
}

/// Output of the fold: the table plus the aggregate series.
#[derive(Debug, Clone)]
pub struct PivotTable {
    /// Fixed columns followed by one column per snapshot.
    pub columns: Vec<ColumnSpec>,
    /// Rows with their per-snapshot values filled in.
    pub rows: Vec<ReportRow>,
    /// Aggregates for the chart and summary.
    pub series: AggregateSeries,
}

/// Folds snapshots, oldest first, into a row skeleton.
#[derive(Debug)]
pub struct SnapshotFolder<'a> {
    config: &'a ReportConfig,
    skeleton: RowSkeleton,
    columns: Vec<ColumnSpec>,
    series: AggregateSeries,
}

impl<'a> SnapshotFolder<'a> {
    /// Starts a fold over a freshly built skeleton.
    #[must_use]
    pub fn new(config: &'a ReportConfig, skeleton: RowSkeleton) -> Self {
        Self {
            config,
            skeleton,
            columns: fixed_columns(),
            series: AggregateSeries::default(),
        }
    }

    /// Merges one snapshot's entries into the table.
    ///
    /// Entries for ledgers outside the scope are skipped. A ledger code
    /// repeated within the snapshot overwrites its earlier balance, and the
    /// group total follows the value left in the cell. A snapshot dated like
    /// the one folded just before it replaces that snapshot's column.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Invariant` if the skeleton lacks a header row
    /// for a configured group, or the combination row the variant needs.
    pub fn fold(
        &mut self,
        snapshot: &SnapshotHeader,
        entries: &[SnapshotEntry],
    ) -> Result<(), ReportError> {
        let key = column_key(snapshot.date);
        if self.series.labels.last() == Some(&key) {
            warn!(
                snapshot_id = %snapshot.id,
                column = %key,
                "Several trial balances share a date, keeping the later one"
            );
            self.skeleton.clear_column(&key);
            self.series.pop();
        } else {
            self.columns.push(ColumnSpec {
                label: snapshot.date.format("%Y-%m-%d").to_string(),
                field_key: key.clone(),
                field_type: FieldType::Float,
                options: None,
                width: COLUMN_WIDTH,
                precision: self.config.precision.column_precision().map(String::from),
            });
        }

        let mut totals = [Decimal::ZERO; 2];
        let mut seen: HashMap<&str, Decimal> = HashMap::with_capacity(entries.len());
        let mut skipped = 0usize;

        for entry in entries {
            let Some(leaf) = self.skeleton.leaf(&entry.ledger_code) else {
                skipped += 1;
                continue;
            };
            if let Some(previous) = seen.insert(entry.ledger_code.as_str(), entry.balance) {
                warn!(
                    snapshot_id = %snapshot.id,
                    ledger_code = %entry.ledger_code,
                    "Duplicate ledger entry in snapshot, keeping the later balance"
                );
                totals[leaf.slot] -= previous;
            }
            totals[leaf.slot] += entry.balance;
            self.row_mut(leaf.row)?
                .values
                .insert(key.clone(), entry.balance);
        }

        let mut presented = [Decimal::ZERO; 2];
        for (slot, group) in self.config.groups.iter().enumerate() {
            let index = self.skeleton.header(*group).ok_or_else(|| {
                ReportError::Invariant(format!("no header row for group {group}"))
            })?;
            presented[slot] = self.config.sign.present(totals[slot]);
            self.row_mut(index)?.values.insert(key.clone(), presented[slot]);
        }

        let combined = presented[0] + presented[1];
        if let Some(label) = self.config.combined_row {
            let index = self.skeleton.combined().ok_or_else(|| {
                ReportError::Invariant(format!("no combination row '{label}'"))
            })?;
            self.row_mut(index)?.values.insert(key.clone(), combined);
        }

        debug!(
            snapshot_id = %snapshot.id,
            column = %key,
            entries = entries.len(),
            skipped,
            "Folded trial balance snapshot"
        );

        self.series.labels.push(key);
        self.series.first.push(presented[0]);
        self.series.second.push(presented[1]);
        self.series.combined.push(combined);
        Ok(())
    }

    /// Finishes the fold.
    #[must_use]
    pub fn finish(self) -> PivotTable {
        PivotTable {
            columns: self.columns,
            rows: self.skeleton.into_rows(),
            series: self.series,
        }
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut ReportRow, ReportError> {
        self.skeleton
            .row_mut(index)
            .ok_or_else(|| ReportError::Invariant(format!("row index {index} out of bounds")))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::reports::skeleton::scope_ledgers;
    use crate::reports::types::{LedgerDefinition, LedgerGroup};

    fn snapshot(y: i32, m: u32, d: u32) -> SnapshotHeader {
        SnapshotHeader {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn pnl_folder(config: &ReportConfig) -> SnapshotFolder<'_> {
        let ledgers = vec![
            LedgerDefinition::new("R1", "Sales", LedgerGroup::Revenue),
            LedgerDefinition::new("E1", "Rent", LedgerGroup::Expense),
        ];
        let skeleton = RowSkeleton::build(config, &scope_ledgers(&ledgers, &config.groups));
        SnapshotFolder::new(config, skeleton)
    }

    #[test]
    fn test_column_key_format() {
        assert_eq!(column_key(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()), "05-01-2024");
    }

    #[test]
    fn test_fold_profit_and_loss() {
        let config = ReportConfig::profit_and_loss();
        let mut folder = pnl_folder(&config);
        folder
            .fold(
                &snapshot(2024, 1, 31),
                &[
                    SnapshotEntry::new("E1", dec!(40)),
                    SnapshotEntry::new("R1", dec!(100)),
                ],
            )
            .unwrap();
        let table = folder.finish();

        let value = |i: usize| table.rows[i].value("31-01-2024");
        assert_eq!(value(0), Some(dec!(-100)));
        assert_eq!(value(1), Some(dec!(100)));
        assert_eq!(value(2), Some(dec!(-40)));
        assert_eq!(value(3), Some(dec!(40)));
        assert_eq!(value(4), Some(dec!(-140)));

        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.columns[3].label, "2024-01-31");
        assert_eq!(table.columns[3].precision.as_deref(), Some("0"));
        assert_eq!(table.series.labels, ["31-01-2024"]);
        assert_eq!(table.series.combined, [dec!(-140)]);
    }

    #[test]
    fn test_out_of_scope_entries_are_ignored() {
        let config = ReportConfig::profit_and_loss();
        let mut folder = pnl_folder(&config);
        folder
            .fold(
                &snapshot(2024, 2, 29),
                &[
                    SnapshotEntry::new("A1", dec!(999)),
                    SnapshotEntry::new("R1", dec!(10)),
                ],
            )
            .unwrap();
        let table = folder.finish();

        assert_eq!(table.series.first, [dec!(-10)]);
        assert_eq!(table.series.second, [dec!(0)]);
        assert_eq!(table.rows[3].value("29-02-2024"), None);
    }

    #[test]
    fn test_duplicate_entry_last_write_wins_in_cell_and_total() {
        let config = ReportConfig::balance_sheet();
        let ledgers = vec![LedgerDefinition::new("A1", "Cash", LedgerGroup::Asset)];
        let skeleton = RowSkeleton::build(&config, &ledgers);
        let mut folder = SnapshotFolder::new(&config, skeleton);
        folder
            .fold(
                &snapshot(2024, 3, 31),
                &[
                    SnapshotEntry::new("A1", dec!(5)),
                    SnapshotEntry::new("A1", dec!(7)),
                ],
            )
            .unwrap();
        let table = folder.finish();

        assert_eq!(table.rows[1].value("31-03-2024"), Some(dec!(7)));
        assert_eq!(table.rows[0].value("31-03-2024"), Some(dec!(7)));
    }

    #[test]
    fn test_missing_combined_row_is_an_invariant_violation() {
        let config = ReportConfig::profit_and_loss();
        let skeleton = RowSkeleton::build(&ReportConfig::custom_profit_and_loss(), &[]);
        let mut folder = SnapshotFolder::new(&config, skeleton);

        let err = folder.fold(&snapshot(2024, 1, 31), &[]).unwrap_err();
        assert!(matches!(err, ReportError::Invariant(_)));
    }

    #[test]
    fn test_missing_header_is_an_invariant_violation() {
        let config = ReportConfig::balance_sheet();
        let skeleton = RowSkeleton::build(&ReportConfig::profit_and_loss(), &[]);
        let mut folder = SnapshotFolder::new(&config, skeleton);

        let err = folder.fold(&snapshot(2024, 1, 31), &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal invariant violated: no header row for group Asset"
        );
    }

    #[test]
    fn test_empty_snapshot_writes_zero_totals() {
        let config = ReportConfig::delta();
        let skeleton = RowSkeleton::build(&config, &[]);
        let mut folder = SnapshotFolder::new(&config, skeleton);
        folder.fold(&snapshot(2024, 4, 30), &[]).unwrap();
        let table = folder.finish();

        assert_eq!(table.rows[0].value("30-04-2024"), Some(Decimal::ZERO));
        assert_eq!(table.series.combined, [Decimal::ZERO]);
        assert_eq!(table.columns[3].precision, None);
    }

    #[test]
    fn test_same_date_snapshot_replaces_earlier_column() {
        let config = ReportConfig::delta();
        let ledgers = vec![
            LedgerDefinition::new("A1", "Cash", LedgerGroup::Asset),
            LedgerDefinition::new("A2", "Bank", LedgerGroup::Asset),
        ];
        let mut folder = SnapshotFolder::new(&config, RowSkeleton::build(&config, &ledgers));
        folder
            .fold(
                &snapshot(2024, 1, 31),
                &[
                    SnapshotEntry::new("A1", dec!(100)),
                    SnapshotEntry::new("A2", dec!(5)),
                ],
            )
            .unwrap();
        folder
            .fold(&snapshot(2024, 1, 31), &[SnapshotEntry::new("A1", dec!(30))])
            .unwrap();
        let table = folder.finish();

        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows[1].value("31-01-2024"), Some(dec!(30)));
        assert_eq!(table.rows[2].value("31-01-2024"), None);
        assert_eq!(table.rows[0].value("31-01-2024"), Some(dec!(30)));
        assert_eq!(table.series.labels, ["31-01-2024"]);
        assert_eq!(table.series.first, [dec!(30)]);
        assert_eq!(table.series.combined, [dec!(30)]);
    }

    #[test]
    fn test_distinct_dates_keep_their_own_columns() {
        let config = ReportConfig::delta();
        let ledgers = vec![LedgerDefinition::new("A1", "Cash", LedgerGroup::Asset)];
        let mut folder = SnapshotFolder::new(&config, RowSkeleton::build(&config, &ledgers));
        folder
            .fold(&snapshot(2024, 1, 31), &[SnapshotEntry::new("A1", dec!(100))])
            .unwrap();
        folder
            .fold(&snapshot(2024, 2, 29), &[SnapshotEntry::new("A1", dec!(30))])
            .unwrap();
        let table = folder.finish();

        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.rows[0].value("31-01-2024"), Some(dec!(100)));
        assert_eq!(table.rows[0].value("29-02-2024"), Some(dec!(30)));
        assert_eq!(table.series.first, [dec!(100), dec!(30)]);
    }
}
