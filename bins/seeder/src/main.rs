//! Seeds a demo chart of accounts and six month-end trial balances.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use trialview_core::reports::{LedgerDefinition, LedgerGroup, SnapshotEntry};
use trialview_db::{TrialBalanceRepository, entities::trial_balances};
use trialview_shared::AppConfig;

/// Demo ledgers with the balance of the first month and the monthly change.
///
/// Credit balances (revenue, liabilities) are negative.
const LEDGERS: [(&str, &str, LedgerGroup, i64, i64); 8] = [
    ("1000", "Cash", LedgerGroup::Asset, 25_000, 1_800),
    ("1100", "Accounts Receivable", LedgerGroup::Asset, 12_000, 650),
    ("2000", "Accounts Payable", LedgerGroup::Liability, -8_500, -300),
    ("2100", "Bank Loan", LedgerGroup::Liability, -20_000, 500),
    ("4000", "Sales", LedgerGroup::Revenue, -15_000, -15_400),
    ("4100", "Service Income", LedgerGroup::Revenue, -4_200, -3_900),
    ("5000", "Rent", LedgerGroup::Expense, 3_000, 3_000),
    ("5100", "Salaries", LedgerGroup::Expense, 9_500, 9_750),
];

const MONTHS: u32 = 6;
const YEAR: i32 = 2024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = trialview_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    let repo = TrialBalanceRepository::new(db.clone());

    println!("Seeding ledgers...");
    for (code, name, group, _, _) in LEDGERS {
        repo.save_ledger(&LedgerDefinition::new(code, name, group))
            .await
            .with_context(|| format!("Failed to save ledger {code}"))?;
    }

    println!("Seeding trial balances...");
    seed_trial_balances(&db, &repo).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_trial_balances(
    db: &DatabaseConnection,
    repo: &TrialBalanceRepository,
) -> anyhow::Result<()> {
    if trial_balances::Entity::find().count(db).await? > 0 {
        println!("  Trial balances already exist, skipping...");
        return Ok(());
    }

    for month in 1..=MONTHS {
        let date = month_end(month).context("Invalid month")?;
        let step = i64::from(month - 1);
        let entries: Vec<SnapshotEntry> = LEDGERS
            .iter()
            .map(|(code, _, _, opening, change)| {
                SnapshotEntry::new(*code, Decimal::from(opening + change * step))
            })
            .collect();

        let id = repo.create_snapshot(date, &entries).await?;
        println!("  Created trial balance {date} ({id})");
    }
    Ok(())
}

fn month_end(month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(YEAR, month + 1, 1)?.pred_opt()
}
