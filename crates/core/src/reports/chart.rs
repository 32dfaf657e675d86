//! Chart and summary assembly.

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::pivot::AggregateSeries;
use super::types::{ChartData, ChartDescriptor, ChartSeries, Indicator, SeriesKind, SummaryItem};
use super::variant::{ReportConfig, SummaryBasis};

/// Summary value shown when no snapshot fell in the range.
pub const NO_DATA: &str = "--";

/// Builds the chart descriptor from the aggregate series.
#[must_use]
pub fn build_chart(config: &ReportConfig, series: &AggregateSeries) -> ChartDescriptor {
    let coerce = |values: &[Decimal]| -> Vec<Decimal> {
        values
            .iter()
            .map(|v| config.precision.chart_value(*v))
            .collect()
    };
    let [first, second, combined] = config.series_names;

    ChartDescriptor {
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![
                ChartSeries {
                    name: first.to_string(),
                    values: coerce(&series.first),
                    kind: SeriesKind::Bar,
                },
                ChartSeries {
                    name: second.to_string(),
                    values: coerce(&series.second),
                    kind: SeriesKind::Bar,
                },
                ChartSeries {
                    name: combined.to_string(),
                    values: coerce(&series.combined),
                    kind: config.combined_series_kind,
                },
            ],
        },
        chart_type: config.chart_type,
    }
}

/// Builds the one-entry summary strip from the combined series.
#[must_use]
pub fn build_summary(config: &ReportConfig, combined: &[Decimal]) -> Vec<SummaryItem> {
    let representative = match config.summary_basis {
        _ if combined.is_empty() => None,
        SummaryBasis::Sum => Some(combined.iter().copied().sum::<Decimal>()),
        SummaryBasis::Last => combined.last().copied(),
    };

    let (value, indicator) = match representative {
        Some(v) => (
            format_amount(v, config.precision.summary_decimals()),
            if v.is_sign_negative() && !v.is_zero() {
                Indicator::Red
            } else {
                Indicator::Green
            },
        ),
        None => (NO_DATA.to_string(), Indicator::Grey),
    };

    vec![SummaryItem {
        label: config.summary_label.to_string(),
        value,
        indicator,
    }]
}

/// Formats an amount with `,` thousands separators and a fixed number of
/// decimals, rounding half away from zero: `1234567.891` at 2 places is
/// `1,234,567.89`.
#[must_use]
pub fn format_amount(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();
    let integer = magnitude
        .trunc()
        .to_u128()
        .map_or_else(|| magnitude.trunc().to_string(), |n| n.to_formatted_string(&Locale::en));

    if decimals == 0 {
        return format!("{sign}{integer}");
    }

    // `fract` keeps the rounded scale; pad to the requested width.
    let fraction = format!("{:.*}", decimals as usize, magnitude.fract());
    let digits = fraction.split('.').nth(1).unwrap_or_default();
    format!("{sign}{integer}.{digits}")
}
