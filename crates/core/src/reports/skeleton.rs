//! Ledger scope and the initial row layout of a report.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::types::{LedgerDefinition, LedgerGroup, ReportRow};
use super::variant::ReportConfig;

/// Keeps the ledgers whose group is in `groups`, ordered by code.
///
/// Data sources use this to honour the `listLedgers` contract; the engine
/// applies it again so a loose source cannot widen the scope.
#[must_use]
pub fn scope_ledgers(ledgers: &[LedgerDefinition], groups: &[LedgerGroup]) -> Vec<LedgerDefinition> {
    let mut scoped: Vec<LedgerDefinition> = ledgers
        .iter()
        .filter(|ledger| groups.contains(&ledger.group))
        .cloned()
        .collect();
    scoped.sort_by(|a, b| a.code.cmp(&b.code));
    scoped
}

/// Position of a leaf row and the group slot its balances accumulate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafRef {
    /// Index into the row list.
    pub row: usize,
    /// Index into `ReportConfig::groups`.
    pub slot: usize,
}

/// Initial rows of a report plus the lookups the folder needs.
#[derive(Debug, Clone)]
pub struct RowSkeleton {
    rows: Vec<ReportRow>,
    leaves: HashMap<String, LeafRef>,
    headers: HashMap<LedgerGroup, usize>,
    combined: Option<usize>,
}

impl RowSkeleton {
    /// Lays out one header per group followed by that group's ledgers, then
    /// the combination row when the variant has one.
    #[must_use]
    pub fn build(config: &ReportConfig, ledgers: &[LedgerDefinition]) -> Self {
        let mut rows = Vec::with_capacity(ledgers.len() + config.groups.len() + 1);
        let mut leaves = HashMap::with_capacity(ledgers.len());
        let mut headers = HashMap::with_capacity(config.groups.len());

        for (slot, group) in config.groups.iter().enumerate() {
            headers.insert(*group, rows.len());
            rows.push(ReportRow::synthetic(group.as_str()));

            for ledger in ledgers.iter().filter(|l| l.group == *group) {
                // First definition of a code wins; later ones get no row.
                if let Entry::Vacant(entry) = leaves.entry(ledger.code.clone()) {
                    entry.insert(LeafRef {
                        row: rows.len(),
                        slot,
                    });
                    rows.push(ReportRow::leaf(ledger));
                }
            }
        }

        let combined = config.combined_row.map(|label| {
            rows.push(ReportRow::synthetic(label));
            rows.len() - 1
        });

        Self {
            rows,
            leaves,
            headers,
            combined,
        }
    }

    /// Looks up the leaf row of a ledger code.
    #[must_use]
    pub fn leaf(&self, ledger_code: &str) -> Option<LeafRef> {
        self.leaves.get(ledger_code).copied()
    }

    /// Index of a group's header row.
    #[must_use]
    pub fn header(&self, group: LedgerGroup) -> Option<usize> {
        self.headers.get(&group).copied()
    }

    /// Index of the combination row.
    #[must_use]
    pub const fn combined(&self) -> Option<usize> {
        self.combined
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Mutable row by index.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut ReportRow> {
        self.rows.get_mut(index)
    }

    /// Drops every value stored under a column key.
    pub fn clear_column(&mut self, column_key: &str) {
        for row in &mut self.rows {
            row.values.remove(column_key);
        }
    }

    /// Consumes the skeleton, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledgers() -> Vec<LedgerDefinition> {
        vec![
            LedgerDefinition::new("E200", "Rent", LedgerGroup::Expense),
            LedgerDefinition::new("R100", "Sales", LedgerGroup::Revenue),
            LedgerDefinition::new("A100", "Cash", LedgerGroup::Asset),
            LedgerDefinition::new("E100", "Salaries", LedgerGroup::Expense),
        ]
    }

    #[test]
    fn test_scope_filters_and_orders_by_code() {
        let scoped = scope_ledgers(&ledgers(), &[LedgerGroup::Revenue, LedgerGroup::Expense]);
        let codes: Vec<&str> = scoped.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["E100", "E200", "R100"]);
    }

    #[test]
    fn test_profit_and_loss_layout() {
        let config = ReportConfig::profit_and_loss();
        let scoped = scope_ledgers(&ledgers(), &config.groups);
        let skeleton = RowSkeleton::build(&config, &scoped);

        let layout: Vec<(&str, Option<&str>, u8)> = skeleton
            .rows()
            .iter()
            .map(|r| (r.group.as_str(), r.ledger_code.as_deref(), r.indent))
            .collect();
        assert_eq!(
            layout,
            [
                ("Revenue", None, 0),
                ("Revenue", Some("R100"), 1),
                ("Expense", None, 0),
                ("Expense", Some("E100"), 1),
                ("Expense", Some("E200"), 1),
                ("Profit/Loss", None, 0),
            ]
        );
        assert_eq!(skeleton.header(LedgerGroup::Revenue), Some(0));
        assert_eq!(skeleton.header(LedgerGroup::Expense), Some(2));
        assert_eq!(skeleton.combined(), Some(5));
        assert_eq!(skeleton.leaf("E200"), Some(LeafRef { row: 4, slot: 1 }));
        assert_eq!(skeleton.leaf("A100"), None);
    }

    #[test]
    fn test_delta_layout_has_no_combined_row() {
        let config = ReportConfig::delta();
        let skeleton = RowSkeleton::build(&config, &scope_ledgers(&ledgers(), &config.groups));

        assert_eq!(skeleton.combined(), None);
        assert_eq!(skeleton.rows().len(), 3);
        assert_eq!(skeleton.rows()[2].group, "Liability");
        assert!(skeleton.rows()[2].is_synthetic());
    }

    #[test]
    fn test_layout_is_idempotent() {
        let config = ReportConfig::balance_sheet();
        let scoped = scope_ledgers(&ledgers(), &config.groups);
        let first = RowSkeleton::build(&config, &scoped).into_rows();
        let second = RowSkeleton::build(&config, &scoped).into_rows();
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_ledger_code_gets_one_row() {
        let config = ReportConfig::balance_sheet();
        let ledgers = vec![
            LedgerDefinition::new("A100", "Cash", LedgerGroup::Asset),
            LedgerDefinition::new("A100", "Cash (old)", LedgerGroup::Asset),
            LedgerDefinition::new("A100", "Cash owed", LedgerGroup::Liability),
        ];
        let skeleton = RowSkeleton::build(&config, &ledgers);

        let leaves: Vec<&ReportRow> = skeleton.rows().iter().filter(|r| !r.is_synthetic()).collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].ledger_name.as_deref(), Some("Cash"));
        assert_eq!(skeleton.rows().len(), 4);
        assert_eq!(skeleton.leaf("A100"), Some(LeafRef { row: 1, slot: 0 }));
    }
}
