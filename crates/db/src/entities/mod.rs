//! `SeaORM` entities for the trial balance store.

pub mod trial_balance_children;
pub mod trial_balance_ledgers;
pub mod trial_balances;

pub mod prelude {
    //! Entity aliases.

    pub use super::trial_balance_children::Entity as TrialBalanceChildren;
    pub use super::trial_balance_ledgers::Entity as TrialBalanceLedgers;
    pub use super::trial_balances::Entity as TrialBalances;
}
