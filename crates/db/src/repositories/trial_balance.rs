//! Trial balance repository backing report generation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::{debug, warn};
use trialview_core::reports::{
    DateRange, LedgerDefinition, LedgerGroup, SnapshotEntry, SnapshotHeader, SourceError,
    TrialBalanceSource,
};
use uuid::Uuid;

use crate::entities::{trial_balance_children, trial_balance_ledgers, trial_balances};

/// Trial balance repository over the `trial_balance*` tables.
#[derive(Debug, Clone)]
pub struct TrialBalanceRepository {
    db: DatabaseConnection,
}

impl TrialBalanceRepository {
    /// Creates a new trial balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or renames a ledger in the master list.
    pub async fn save_ledger(&self, ledger: &LedgerDefinition) -> Result<(), DbErr> {
        let existing = trial_balance_ledgers::Entity::find_by_id(ledger.code.clone())
            .one(&self.db)
            .await?;

        let model = trial_balance_ledgers::ActiveModel {
            ledger_code: Set(ledger.code.clone()),
            ledger_name: Set(ledger.name.clone()),
            ledger_group: Set(ledger.group.as_str().to_string()),
        };
        if existing.is_some() {
            model.update(&self.db).await?;
        } else {
            model.insert(&self.db).await?;
        }
        Ok(())
    }

    /// Stores one snapshot with its entries and returns the snapshot id.
    ///
    /// Entries keep their order through the `idx` column.
    pub async fn create_snapshot(
        &self,
        date: NaiveDate,
        entries: &[SnapshotEntry],
    ) -> Result<Uuid, DbErr> {
        let txn = self.db.begin().await?;
        let id = Uuid::new_v4();
        let today = Utc::now();

        trial_balances::ActiveModel {
            id: Set(id),
            trial_balance_date: Set(date),
            upload_date: Set(Some(today.date_naive())),
            created_at: Set(today.into()),
        }
        .insert(&txn)
        .await?;

        for (idx, entry) in (1_i32..).zip(entries) {
            trial_balance_children::ActiveModel {
                id: Set(Uuid::new_v4()),
                parent_id: Set(id),
                idx: Set(idx),
                ledger_code: Set(entry.ledger_code.clone()),
                ledger_name: Set(None),
                balance: Set(entry.balance),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        debug!(%id, %date, entries = entries.len(), "Stored trial balance");
        Ok(id)
    }
}

#[async_trait]
impl TrialBalanceSource for TrialBalanceRepository {
    async fn list_ledgers(
        &self,
        groups: &[LedgerGroup],
    ) -> Result<Vec<LedgerDefinition>, SourceError> {
        let models = trial_balance_ledgers::Entity::find()
            .filter(
                trial_balance_ledgers::Column::LedgerGroup.is_in(groups.iter().map(|g| g.as_str())),
            )
            .order_by_asc(trial_balance_ledgers::Column::LedgerCode)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().filter_map(to_ledger_definition).collect())
    }

    async fn list_snapshots(&self, range: &DateRange) -> Result<Vec<SnapshotHeader>, SourceError> {
        let mut query = trial_balances::Entity::find();
        if let Some(from) = range.from {
            query = query.filter(trial_balances::Column::TrialBalanceDate.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(trial_balances::Column::TrialBalanceDate.lte(to));
        }

        let models = query
            .order_by_asc(trial_balances::Column::TrialBalanceDate)
            .order_by_asc(trial_balances::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| SnapshotHeader {
                id: m.id,
                date: m.trial_balance_date,
            })
            .collect())
    }

    async fn list_snapshot_entries(
        &self,
        snapshot_id: Uuid,
    ) -> Result<Vec<SnapshotEntry>, SourceError> {
        let models = trial_balance_children::Entity::find()
            .filter(trial_balance_children::Column::ParentId.eq(snapshot_id))
            .order_by_asc(trial_balance_children::Column::LedgerCode)
            .order_by_asc(trial_balance_children::Column::Idx)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| SnapshotEntry::new(m.ledger_code, m.balance))
            .collect())
    }
}

fn to_ledger_definition(model: trial_balance_ledgers::Model) -> Option<LedgerDefinition> {
    match model.ledger_group.parse::<LedgerGroup>() {
        Ok(group) => Some(LedgerDefinition::new(
            model.ledger_code,
            model.ledger_name,
            group,
        )),
        Err(e) => {
            warn!(ledger = %model.ledger_code, error = %e, "Skipping ledger with unknown group");
            None
        }
    }
}

#[cfg(test)]
#[path = "trial_balance_tests.rs"]
mod tests;
