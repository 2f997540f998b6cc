/// Denomination code for every stored amount. The system is
/// single-currency; holdings and ledger entries all carry this code.
pub const BASE_CURRENCY: &str = "IDR";

/// Decimal places kept for monetary values. The base currency has no
/// minor units, so derived values round to whole amounts.
pub const VALUE_PRECISION: u32 = 0;

/// Decimal places kept for unit quantities (crypto positions).
pub const QUANTITY_PRECISION: u32 = 8;

/// Number of months covered by the monthly report series by default.
pub const DEFAULT_REPORT_MONTHS: u32 = 6;

/// Number of entries returned by the recent-transactions dashboard list.
pub const RECENT_ENTRIES_LIMIT: i64 = 5;
