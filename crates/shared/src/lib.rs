//! Shared errors and configuration for Trialview.
//!
//! This crate provides the pieces every other crate leans on:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult};
