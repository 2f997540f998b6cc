//! Dashboard and report models, plus the pure aggregation rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::holdings::{Holding, HoldingKind};
use crate::ledger::LedgerEntry;

/// Signed net worth over a holding set: every kind adds its value except
/// debt, which subtracts its stored magnitude. Pure and order-independent.
pub fn net_worth(holdings: &[Holding]) -> Decimal {
    holdings.iter().fold(Decimal::ZERO, |sum, h| {
        if h.kind.is_liability() {
            sum - h.value
        } else {
            sum + h.value
        }
    })
}

/// Sum of all non-debt holding values.
pub fn total_assets(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .filter(|h| !h.kind.is_liability())
        .map(|h| h.value)
        .sum()
}

/// Sum of debt magnitudes (positive).
pub fn total_liabilities(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .filter(|h| h.kind.is_liability())
        .map(|h| h.value)
        .sum()
}

/// Per-kind subtotals for the category breakdown display. Debt keeps its
/// positive magnitude here; the sign applies only in [`net_worth`].
/// Sorted by total descending for stable output.
pub fn kind_subtotals(holdings: &[Holding]) -> Vec<KindSubtotal> {
    let mut totals: HashMap<HoldingKind, Decimal> = HashMap::new();
    for holding in holdings {
        *totals.entry(holding.kind).or_insert(Decimal::ZERO) += holding.value;
    }
    let mut subtotals: Vec<KindSubtotal> = totals
        .into_iter()
        .map(|(kind, total)| KindSubtotal { kind, total })
        .collect();
    subtotals.sort_by(|a, b| b.total.cmp(&a.total).then(a.kind.as_str().cmp(b.kind.as_str())));
    subtotals
}

/// One row of the per-kind breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSubtotal {
    pub kind: HoldingKind,
    pub total: Decimal,
}

/// Net-worth read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    pub net_worth: Decimal,
    pub total_assets: Decimal,
    /// Positive magnitude of all debt holdings.
    pub total_liabilities: Decimal,
    pub subtotals: Vec<KindSubtotal>,
    pub currency: String,
}

/// Current-month dashboard figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Cash flow for the month: income − expense. Not net worth.
    pub balance: Decimal,
    pub total_assets: Decimal,
    pub net_worth: Decimal,
    pub currency: String,
    pub recent_entries: Vec<LedgerEntry>,
}

/// One month of the income/expense report series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportPoint {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// One category's share of spending (or income) over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownItem {
    pub category_id: Option<String>,
    pub name: String,
    pub total: Decimal,
    /// Share of the window's grand total, in percent.
    pub pct: f64,
}
