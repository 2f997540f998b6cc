//! Conversion helpers shared by the storage models.
//!
//! Monetary values are stored as TEXT and parsed back to `Decimal`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal string, tolerating scientific notation by
/// falling back to an f64 parse. A value that cannot be parsed at all is
/// logged and read as zero rather than failing the whole row.
pub fn parse_decimal(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(_) => match f64::from_str(value_str).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as a decimal; reading as zero",
                    field_name,
                    value_str
                );
                Decimal::ZERO
            }
        },
    }
}

/// Parses an optional stored decimal string.
pub fn parse_opt_decimal(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal(v, field_name))
}
