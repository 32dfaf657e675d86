//! Read-only query surface over the trial balance store.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::error::SourceError;
use super::filters::DateRange;
use super::skeleton::scope_ledgers;
use super::types::{LedgerDefinition, LedgerGroup, SnapshotEntry, SnapshotHeader};

/// Backing store the report engine reads from.
#[async_trait]
pub trait TrialBalanceSource: Send + Sync {
    /// Ledgers whose group is in `groups`, ordered by code.
    async fn list_ledgers(
        &self,
        groups: &[LedgerGroup],
    ) -> Result<Vec<LedgerDefinition>, SourceError>;

    /// Snapshots dated within `range`, oldest first.
    async fn list_snapshots(&self, range: &DateRange) -> Result<Vec<SnapshotHeader>, SourceError>;

    /// Entries of one snapshot, ordered by ledger code.
    async fn list_snapshot_entries(
        &self,
        snapshot_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>, SourceError>;
}

#[derive(Debug, Clone)]
struct StoredSnapshot {
    header: SnapshotHeader,
    entries: Vec<SnapshotEntry>,
}

/// Trial balance store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    ledgers: Vec<LedgerDefinition>,
    snapshots: Vec<StoredSnapshot>,
}

impl InMemorySource {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ledger to the master list.
    #[must_use]
    pub fn with_ledger(mut self, code: &str, name: &str, group: LedgerGroup) -> Self {
        self.ledgers.push(LedgerDefinition::new(code, name, group));
        self
    }

    /// Adds a snapshot and returns its id.
    pub fn add_snapshot(&mut self, date: NaiveDate, entries: Vec<SnapshotEntry>) -> Uuid {
        let id = Uuid::new_v4();
        self.snapshots.push(StoredSnapshot {
            header: SnapshotHeader { id, date },
            entries,
        });
        id
    }

    /// Adds a snapshot, builder style.
    #[must_use]
    pub fn with_snapshot(mut self, date: NaiveDate, entries: Vec<SnapshotEntry>) -> Self {
        self.add_snapshot(date, entries);
        self
    }
}

#[async_trait]
impl TrialBalanceSource for InMemorySource {
    async fn list_ledgers(
        &self,
        groups: &[LedgerGroup],
    ) -> Result<Vec<LedgerDefinition>, SourceError> {
        Ok(scope_ledgers(&self.ledgers, groups))
    }

    async fn list_snapshots(&self, range: &DateRange) -> Result<Vec<SnapshotHeader>, SourceError> {
        let mut headers: Vec<SnapshotHeader> = self
            .snapshots
            .iter()
            .map(|s| s.header)
            .filter(|h| range.contains(h.date))
            .collect();
        headers.sort_by_key(|h| h.date);
        Ok(headers)
    }

    async fn list_snapshot_entries(
        &self,
        snapshot_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>, SourceError> {
        let snapshot = self
            .snapshots
            .iter()
            .find(|s| s.header.id == snapshot_id)
            .ok_or_else(|| format!("Trial balance not found: {snapshot_id}"))?;

        let mut entries = snapshot.entries.clone();
        // Stable: repeated codes keep their insertion order.
        entries.sort_by(|a, b| a.ledger_code.cmp(&b.ledger_code));
        Ok(entries)
    }
}
