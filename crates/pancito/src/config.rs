//! Ledger configuration, read from environment variables.

use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;

/// Storage keys of the persisted collections.
pub mod keys {
    pub const DISHES: &str = "@pancito_dishes";
    pub const ORDERS: &str = "@pancito_orders";
    pub const TABLES: &str = "@pancito_tables";
    pub const CUSTOMERS: &str = "@pancito_frequent_customers";
    /// Statistics object saved alongside an imported backup.
    pub const STATISTICS: &str = "@pancito_statistics";
}

const SECONDS_PER_HOUR: i32 = 3600;

/// Ledger settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    /// Tables created on first start when none are stored.
    pub table_count: u32,
    /// Business time zone as whole hours from UTC (Chile: -3).
    pub utc_offset_hours: i32,
    /// Capacity of each actor's request channel.
    pub channel_size: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("pancito-data"),
            table_count: 4,
            utc_offset_hours: -3,
            channel_size: 32,
        }
    }
}

impl LedgerConfig {
    /// Reads `PANCITO_DATA_DIR`, `PANCITO_TABLE_COUNT`, `PANCITO_UTC_OFFSET_HOURS` and
    /// `PANCITO_CHANNEL_SIZE`. Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("PANCITO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            table_count: parse_var("PANCITO_TABLE_COUNT").unwrap_or(defaults.table_count),
            utc_offset_hours: parse_var("PANCITO_UTC_OFFSET_HOURS")
                .filter(|hours: &i32| hours.abs() < 24)
                .unwrap_or(defaults.utc_offset_hours),
            channel_size: parse_var("PANCITO_CHANNEL_SIZE")
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.channel_size),
        }
    }

    /// The business time zone. An out-of-range offset falls back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * SECONDS_PER_HOUR).unwrap_or_else(|| Utc.fix())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset_is_chile() {
        let config = LedgerConfig::default();
        assert_eq!(config.offset().local_minus_utc(), -3 * 3600);
        assert_eq!(config.table_count, 4);
    }
}
