//! Dashboard module - net-worth aggregation and report read models.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;


pub use dashboard_model::{
    kind_subtotals, net_worth, total_assets, total_liabilities, CategoryBreakdownItem,
    DashboardSummary, KindSubtotal, MonthlyReportPoint, NetWorthSummary,
};
pub use dashboard_service::DashboardService;
pub use dashboard_traits::DashboardServiceTrait;
