//! Pure reshaping of backend aggregates into the labeled, color-assigned
//! series the chart components draw. Nothing here touches app state.

use thiserror::Error;

use crate::api::{CategorySummary, MonthlyAggregate};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FALLBACK_COLOR: &str = "#9CA3AF";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("backend sent a malformed month key {0:?}")]
    MalformedMonth(String),
}

/// One slice of the category distribution pie.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: &'static str,
}

/// One bar in the top-categories-by-amount chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BarEntry {
    pub label: String,
    pub total: f64,
    pub color: &'static str,
}

/// Month labels paired with transaction counts.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

/// Month labels paired with incoming/outgoing amounts. The three vectors
/// always have the same length; months without a sum carry `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowSeries {
    pub labels: Vec<String>,
    pub incoming: Vec<f64>,
    pub outgoing: Vec<f64>,
}

/// `"incoming_money"` → `"Incoming Money"`.
pub fn display_label(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fixed display color per transaction category. Total: anything the
/// backend invents later gets the neutral gray.
pub fn color_for_category(category: &str) -> &'static str {
    match category {
        "incoming_money" => "#10B981",
        "payments_to_code_holders" => "#3B82F6",
        "transfers_to_mobile" => "#8B5CF6",
        "bank_deposits" => "#FF8C00",
        "bank_transfers" => "#F59E0B",
        "airtime_purchases" => "#EF4444",
        "cash_power_bills" => "#F97316",
        "third_party_transactions" => "#EC4899",
        "agent_withdrawals" => "#64748B",
        "internet_voice_bundles" => "#84CC16",
        "other_transfers" => "#6B7280",
        _ => FALLBACK_COLOR,
    }
}

/// Pie input: one slice per summary entry, valued by transaction count.
pub fn category_distribution(summary: &[CategorySummary]) -> Vec<PieSlice> {
    summary
        .iter()
        .map(|entry| PieSlice {
            label: display_label(&entry.category),
            value: entry.count,
            color: color_for_category(&entry.category),
        })
        .collect()
}

/// The first `n` summary entries, in backend order. The backend already
/// sorts by total descending; re-sorting here would hide a backend
/// ordering regression instead of surfacing it.
pub fn top_by_amount(summary: &[CategorySummary], n: usize) -> Vec<BarEntry> {
    summary
        .iter()
        .take(n)
        .map(|entry| BarEntry {
            label: display_label(&entry.category),
            total: entry.total,
            color: color_for_category(&entry.category),
        })
        .collect()
}

/// `"2024-03"` → `"Mar 2024"`. Anything that is not a `YYYY-MM` key with a
/// month in 1..=12 is an error: month keys are backend-computed, so a bad
/// one means the contract is broken, not that a row should be dropped.
pub fn month_label(month: &str) -> Result<String, ChartError> {
    let malformed = || ChartError::MalformedMonth(month.to_string());

    let (year, month_number) = month.split_once('-').ok_or_else(malformed)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index: usize = month_number.parse().map_err(|_| malformed())?;
    let name = MONTH_NAMES
        .get(index.wrapping_sub(1))
        .ok_or_else(malformed)?;
    Ok(format!("{name} {year}"))
}

/// Transaction count per month, for the trend line.
pub fn monthly_count_trend(monthly: &[MonthlyAggregate]) -> Result<TrendSeries, ChartError> {
    let mut labels = Vec::with_capacity(monthly.len());
    let mut counts = Vec::with_capacity(monthly.len());
    for entry in monthly {
        labels.push(month_label(&entry.month)?);
        counts.push(entry.transaction_count);
    }
    Ok(TrendSeries { labels, counts })
}

/// Incoming vs outgoing amounts per month. Chart renderers expect numeric
/// series of equal length, so a missing sum becomes `0.0` rather than a
/// hole.
pub fn monthly_flow(monthly: &[MonthlyAggregate]) -> Result<FlowSeries, ChartError> {
    let mut labels = Vec::with_capacity(monthly.len());
    let mut incoming = Vec::with_capacity(monthly.len());
    let mut outgoing = Vec::with_capacity(monthly.len());
    for entry in monthly {
        labels.push(month_label(&entry.month)?);
        incoming.push(entry.incoming_amount.unwrap_or(0.0));
        outgoing.push(entry.outgoing_amount.unwrap_or(0.0));
    }
    Ok(FlowSeries {
        labels,
        incoming,
        outgoing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_entry(category: &str, count: u64, total: f64) -> CategorySummary {
        CategorySummary {
            category: category.to_string(),
            count,
            total,
        }
    }

    fn month_entry(
        month: &str,
        transaction_count: u64,
        incoming: Option<f64>,
        outgoing: Option<f64>,
    ) -> MonthlyAggregate {
        MonthlyAggregate {
            month: month.to_string(),
            transaction_count,
            total_amount: None,
            incoming_amount: incoming,
            outgoing_amount: outgoing,
        }
    }

    #[test]
    fn labels_are_spaced_and_capitalized() {
        assert_eq!(display_label("incoming_money"), "Incoming Money");
        assert_eq!(display_label("cash_power_bills"), "Cash Power Bills");
        assert_eq!(display_label("momo"), "Momo");
    }

    #[test]
    fn every_category_gets_a_color() {
        assert_eq!(color_for_category("incoming_money"), "#10B981");
        assert_eq!(color_for_category("agent_withdrawals"), "#64748B");
        // Unknown keys never come back without a color.
        assert_eq!(color_for_category("loan_repayments"), FALLBACK_COLOR);
        assert_eq!(color_for_category(""), FALLBACK_COLOR);
    }

    #[test]
    fn distribution_follows_summary_order() {
        let summary = vec![
            summary_entry("incoming_money", 10, 50_000.0),
            summary_entry("airtime_purchases", 25, 12_000.0),
        ];
        let slices = category_distribution(&summary);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Incoming Money");
        assert_eq!(slices[0].value, 10);
        assert_eq!(slices[1].label, "Airtime Purchases");
        assert_eq!(slices[1].color, "#EF4444");
    }

    #[test]
    fn top_by_amount_trusts_backend_order() {
        // bank_deposits has the larger total but the smaller count; the
        // backend put it first and the builder must keep it there rather
        // than re-sorting by anything.
        let summary = vec![
            summary_entry("bank_deposits", 3, 200_000.0),
            summary_entry("incoming_money", 10, 50_000.0),
        ];
        let top = top_by_amount(&summary, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].label, "Bank Deposits");
        assert_eq!(top[0].total, 200_000.0);
    }

    #[test]
    fn top_by_amount_handles_short_summaries() {
        let summary = vec![summary_entry("incoming_money", 10, 50_000.0)];
        assert_eq!(top_by_amount(&summary, 5).len(), 1);
        assert!(top_by_amount(&[], 5).is_empty());
    }

    #[test]
    fn month_labels_use_the_fixed_name_table() {
        assert_eq!(month_label("2024-03").unwrap(), "Mar 2024");
        assert_eq!(month_label("2023-12").unwrap(), "Dec 2023");
        assert_eq!(month_label("2024-01").unwrap(), "Jan 2024");
    }

    #[test]
    fn malformed_month_keys_are_hard_errors() {
        for bad in ["2024-13", "2024-00", "garbage", "", "2024", "24-03", "2024-"] {
            assert_eq!(
                month_label(bad),
                Err(ChartError::MalformedMonth(bad.to_string())),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn trend_series_keeps_labels_and_counts_parallel() {
        let monthly = vec![
            month_entry("2024-01", 4, None, None),
            month_entry("2024-02", 9, None, None),
        ];
        let trend = monthly_count_trend(&monthly).unwrap();
        assert_eq!(trend.labels, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(trend.counts, vec![4, 9]);
    }

    #[test]
    fn trend_series_propagates_bad_months() {
        let monthly = vec![month_entry("2024-31", 4, None, None)];
        assert!(monthly_count_trend(&monthly).is_err());
    }

    #[test]
    fn missing_flow_amounts_become_zero_not_holes() {
        let monthly = vec![
            month_entry("2024-01", 4, Some(1_000.0), Some(400.0)),
            month_entry("2024-02", 2, None, Some(250.0)),
            month_entry("2024-03", 1, Some(80.0), None),
        ];
        let flow = monthly_flow(&monthly).unwrap();
        assert_eq!(flow.labels.len(), 3);
        assert_eq!(flow.incoming, vec![1_000.0, 0.0, 80.0]);
        assert_eq!(flow.outgoing, vec![400.0, 250.0, 0.0]);
    }
}
