use chrono::Datelike;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::dashboard_model::{
    kind_subtotals, net_worth, total_assets, total_liabilities, CategoryBreakdownItem,
    DashboardSummary, MonthlyReportPoint, NetWorthSummary,
};
use super::dashboard_traits::DashboardServiceTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::constants::{BASE_CURRENCY, RECENT_ENTRIES_LIMIT};
use crate::errors::Result;
use crate::holdings::HoldingRepositoryTrait;
use crate::ledger::{LedgerDirection, LedgerFilter, LedgerRepositoryTrait};
use crate::utils::{month_bounds, month_start_back};

/// Service computing the dashboard and report aggregations.
pub struct DashboardService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            holding_repository,
            ledger_repository,
            category_repository,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary> {
        let (month_start, month_end) = month_bounds(today);
        debug!("Dashboard summary for {} .. {}", month_start, month_end);

        let entries = self
            .ledger_repository
            .list(&LedgerFilter::range(month_start, month_end))?;

        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for entry in &entries {
            match entry.direction {
                LedgerDirection::Income => total_income += entry.amount,
                LedgerDirection::Expense => total_expense += entry.amount,
            }
        }

        let holdings = self.holding_repository.list(None)?;

        let recent_entries = self.ledger_repository.list(&LedgerFilter {
            limit: Some(RECENT_ENTRIES_LIMIT),
            ..LedgerFilter::default()
        })?;

        Ok(DashboardSummary {
            month_start,
            month_end,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            total_assets: total_assets(&holdings),
            net_worth: net_worth(&holdings),
            currency: BASE_CURRENCY.to_string(),
            recent_entries,
        })
    }

    fn get_net_worth(&self) -> Result<NetWorthSummary> {
        let holdings = self.holding_repository.list(None)?;
        Ok(NetWorthSummary {
            net_worth: net_worth(&holdings),
            total_assets: total_assets(&holdings),
            total_liabilities: total_liabilities(&holdings),
            subtotals: kind_subtotals(&holdings),
            currency: BASE_CURRENCY.to_string(),
        })
    }

    fn get_monthly_report(&self, today: NaiveDate, months: u32) -> Result<Vec<MonthlyReportPoint>> {
        let months = months.max(1);
        let from = month_start_back(today, months - 1);
        let (_, to) = month_bounds(today);

        let entries = self.ledger_repository.list(&LedgerFilter::range(from, to))?;

        let mut buckets: HashMap<(i32, u32), (Decimal, Decimal)> = HashMap::new();
        for entry in &entries {
            let key = (entry.date.year(), entry.date.month());
            let bucket = buckets.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
            match entry.direction {
                LedgerDirection::Income => bucket.0 += entry.amount,
                LedgerDirection::Expense => bucket.1 += entry.amount,
            }
        }

        // Emit every month in the window, oldest first, including empty ones.
        let mut points = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let month_start = month_start_back(today, back);
            let key = (month_start.year(), month_start.month());
            let (income, expense) = buckets.get(&key).copied().unwrap_or_default();
            points.push(MonthlyReportPoint {
                year: key.0,
                month: key.1,
                income,
                expense,
                net: income - expense,
            });
        }
        Ok(points)
    }

    fn get_category_breakdown(
        &self,
        direction: LedgerDirection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CategoryBreakdownItem>> {
        let entries = self.ledger_repository.list(&LedgerFilter {
            direction: Some(direction),
            ..LedgerFilter::range(from, to)
        })?;

        let category_names: HashMap<String, String> = self
            .category_repository
            .list(None)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut totals: HashMap<Option<String>, Decimal> = HashMap::new();
        for entry in &entries {
            *totals
                .entry(entry.category_id.clone())
                .or_insert(Decimal::ZERO) += entry.amount;
        }

        let grand_total: Decimal = totals.values().copied().sum();
        let mut items: Vec<CategoryBreakdownItem> = totals
            .into_iter()
            .map(|(category_id, total)| {
                let name = category_id
                    .as_ref()
                    .and_then(|id| category_names.get(id).cloned())
                    .unwrap_or_else(|| "Uncategorized".to_string());
                let pct = if grand_total > Decimal::ZERO {
                    (total / grand_total * Decimal::ONE_HUNDRED)
                        .to_f64()
                        .unwrap_or(0.0)
                } else {
                    0.0
                };
                CategoryBreakdownItem {
                    category_id,
                    name,
                    total,
                    pct,
                }
            })
            .collect();

        items.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));
        Ok(items)
    }
}
