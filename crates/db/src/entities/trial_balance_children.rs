//! `SeaORM` Entity for trial_balance_children table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "trial_balance_children")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_id: Uuid,
    /// Position within the uploaded sheet.
    pub idx: i32,
    pub ledger_code: String,
    pub ledger_name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub balance: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trial_balances::Entity",
        from = "Column::ParentId",
        to = "super::trial_balances::Column::Id",
        on_delete = "Cascade"
    )]
    TrialBalances,
}

impl Related<super::trial_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrialBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
