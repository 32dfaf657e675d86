//! Report generation service.

use tracing::{debug, info};

use super::chart::{build_chart, build_summary};
use super::error::ReportError;
use super::filters::{DateRange, ReportFilters};
use super::pivot::SnapshotFolder;
use super::skeleton::{RowSkeleton, scope_ledgers};
use super::source::TrialBalanceSource;
use super::types::{LedgerDefinition, ReportDetails, ReportOutput};
use super::variant::{ReportConfig, ReportKind, ReportName};

/// Service for generating trial-balance reports.
pub struct ReportService;

impl ReportService {
    /// Runs a report page the way the host invokes it.
    ///
    /// No filters, or only blank ones, yield empty columns and rows. The
    /// cash-flow statement is a stub that returns the same.
    pub async fn execute<S>(
        source: &S,
        report: ReportName,
        filters: Option<&ReportFilters>,
    ) -> Result<ReportOutput, ReportError>
    where
        S: TrialBalanceSource + ?Sized,
    {
        let Some(filters) = filters.filter(|f| !f.is_empty()) else {
            debug!(report = %report, "No filters supplied, returning empty report");
            return Ok(ReportOutput::empty());
        };

        let kind = report.resolve_kind(filters.report.as_deref())?;
        let Some(config) = kind.config() else {
            debug!(report = %report, ?kind, "Statement not computed, returning empty report");
            return Ok(ReportOutput::empty());
        };

        let range = filters.date_range()?;
        Self::generate(source, &config, &range).await
    }

    /// Runs one report kind over a date range.
    pub async fn generate_kind<S>(
        source: &S,
        kind: ReportKind,
        range: &DateRange,
    ) -> Result<ReportOutput, ReportError>
    where
        S: TrialBalanceSource + ?Sized,
    {
        match kind.config() {
            Some(config) => Self::generate(source, &config, range).await,
            None => Ok(ReportOutput::empty()),
        }
    }

    /// Pivots every snapshot in `range` according to `config`.
    pub async fn generate<S>(
        source: &S,
        config: &ReportConfig,
        range: &DateRange,
    ) -> Result<ReportOutput, ReportError>
    where
        S: TrialBalanceSource + ?Sized,
    {
        let ledgers = Self::resolve_ledger_scope(source, config).await?;
        let snapshots = source
            .list_snapshots(range)
            .await
            .map_err(ReportError::DataSource)?;

        let mut folder = SnapshotFolder::new(config, RowSkeleton::build(config, &ledgers));
        for snapshot in &snapshots {
            let entries = source
                .list_snapshot_entries(snapshot.id)
                .await
                .map_err(ReportError::DataSource)?;
            folder.fold(snapshot, &entries)?;
        }
        let table = folder.finish();

        info!(
            groups = ?config.groups,
            ledgers = ledgers.len(),
            snapshots = snapshots.len(),
            "Generated trial balance report"
        );

        Ok(ReportOutput {
            details: Some(ReportDetails {
                message: None,
                chart: build_chart(config, &table.series),
                summary: build_summary(config, &table.series.combined),
                add_total_row: config.add_total_row,
            }),
            columns: table.columns,
            rows: table.rows,
        })
    }

    /// Fetches the ledgers of the variant's two groups, ordered by code.
    pub async fn resolve_ledger_scope<S>(
        source: &S,
        config: &ReportConfig,
    ) -> Result<Vec<LedgerDefinition>, ReportError>
    where
        S: TrialBalanceSource + ?Sized,
    {
        let ledgers = source
            .list_ledgers(&config.groups)
            .await
            .map_err(ReportError::DataSource)?;
        Ok(scope_ledgers(&ledgers, &config.groups))
    }
}
