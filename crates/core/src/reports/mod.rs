//! Trial-balance report generation.
//!
//! Each report pivots a range of trial-balance snapshots into a table with
//! one column per snapshot date, adds group subtotals, and derives a chart
//! and a one-line summary:
//! - Profit and Loss Statement
//! - Balance Sheet
//! - Delta Report
//! - Custom PnL Report
//!
//! The variants differ only in their [`ReportConfig`].

pub mod chart;
pub mod error;
pub mod filters;
pub mod pivot;
pub mod service;
pub mod skeleton;
pub mod source;
pub mod types;
pub mod variant;
pub mod viewer;


pub use error::{ReportError, SourceError};
pub use filters::{DateRange, ReportFilters};
pub use service::ReportService;
pub use source::{InMemorySource, TrialBalanceSource};
pub use types::*;
pub use variant::{ReportConfig, ReportKind, ReportName};
pub use viewer::ReportViewerSpec;
