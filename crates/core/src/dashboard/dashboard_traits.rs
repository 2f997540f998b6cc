//! Dashboard/report service trait.

use chrono::NaiveDate;

use super::dashboard_model::{
    CategoryBreakdownItem, DashboardSummary, MonthlyReportPoint, NetWorthSummary,
};
use crate::errors::Result;
use crate::ledger::LedgerDirection;

/// Read-only aggregations over holdings and the ledger. Every method is a
/// pure function of the stored data at call time; nothing is cached.
pub trait DashboardServiceTrait: Send + Sync {
    /// Current-month income/expense/balance plus asset totals and the
    /// recent-transactions list.
    fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary>;

    /// Signed net worth with per-kind subtotals.
    fn get_net_worth(&self) -> Result<NetWorthSummary>;

    /// Income/expense sums per month for the `months` months ending at
    /// `today`'s month.
    fn get_monthly_report(&self, today: NaiveDate, months: u32) -> Result<Vec<MonthlyReportPoint>>;

    /// Per-category totals and percentage shares for entries of the given
    /// direction inside the window.
    fn get_category_breakdown(
        &self,
        direction: LedgerDirection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CategoryBreakdownItem>>;
}
