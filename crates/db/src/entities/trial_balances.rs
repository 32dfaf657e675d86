//! `SeaORM` Entity for trial_balances table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "trial_balances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trial_balance_date: Date,
    pub upload_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trial_balance_children::Entity")]
    TrialBalanceChildren,
}

impl Related<super::trial_balance_children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrialBalanceChildren.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
