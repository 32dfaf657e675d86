//! Trial balance store.
//!
//! Creates the ledger master list, the snapshot headers and their entries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: LEDGER MASTER
        // ============================================================
        db.execute_unprepared(TRIAL_BALANCE_LEDGERS_SQL).await?;

        // ============================================================
        // PART 2: SNAPSHOTS
        // ============================================================
        db.execute_unprepared(TRIAL_BALANCES_SQL).await?;
        db.execute_unprepared(TRIAL_BALANCE_CHILDREN_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const TRIAL_BALANCE_LEDGERS_SQL: &str = r"
CREATE TABLE trial_balance_ledgers (
    ledger_code VARCHAR(140) PRIMARY KEY,
    ledger_name VARCHAR(255) NOT NULL,
    ledger_group VARCHAR(20) NOT NULL
        CHECK (ledger_group IN ('Revenue', 'Expense', 'Asset', 'Liability'))
);

CREATE INDEX idx_trial_balance_ledgers_group ON trial_balance_ledgers(ledger_group);
";

const TRIAL_BALANCES_SQL: &str = r"
CREATE TABLE trial_balances (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    trial_balance_date DATE NOT NULL,
    upload_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_trial_balances_date ON trial_balances(trial_balance_date);
";

const TRIAL_BALANCE_CHILDREN_SQL: &str = r"
CREATE TABLE trial_balance_children (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent_id UUID NOT NULL REFERENCES trial_balances(id) ON DELETE CASCADE,
    idx INTEGER NOT NULL DEFAULT 0,
    ledger_code VARCHAR(140) NOT NULL,
    ledger_name VARCHAR(255),
    balance NUMERIC(20, 4) NOT NULL DEFAULT 0
);

-- Entries may name ledgers missing from the master list
CREATE INDEX idx_trial_balance_children_parent ON trial_balance_children(parent_id, ledger_code, idx);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS trial_balance_children CASCADE;
DROP TABLE IF EXISTS trial_balances CASCADE;
DROP TABLE IF EXISTS trial_balance_ledgers CASCADE;
";
