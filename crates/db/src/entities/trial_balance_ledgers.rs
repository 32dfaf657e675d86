//! `SeaORM` Entity for trial_balance_ledgers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "trial_balance_ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ledger_code: String,
    pub ledger_name: String,
    /// One of `Revenue`, `Expense`, `Asset`, `Liability`.
    pub ledger_group: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
