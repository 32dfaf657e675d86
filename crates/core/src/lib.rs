//! Core report logic for Trialview.
//!
//! This crate turns periodic trial-balance snapshots into pivoted,
//! chart-ready financial reports. It has ZERO web or database dependencies:
//! data comes in through the [`reports::TrialBalanceSource`] trait.
//!
//! # Modules
//!
//! - `reports` - Profit & Loss, Balance Sheet and delta reports over snapshots

pub mod reports;
