//! Display formatting for the terminal browser
//!
//! Explicitly constructed helpers; nothing here is process-global.

use chrono::{DateTime, Utc};

/// Long-date rendering of a block timestamp, e.g. "February 1, 2024".
pub fn block_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

/// Full timestamp rendering, e.g. "2024-02-01 09:04:31 UTC".
pub fn block_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render a mutez amount as tez with six decimals.
pub fn tez_amount(mutez: i64) -> String {
    format!("{:.6} tz", mutez as f64 / 1_000_000.0)
}

/// Shorten a Tezos address for table display.
pub fn short_address(address: &str) -> String {
    if address.len() > 16 {
        format!("{}...{}", &address[..8], &address[address.len() - 5..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_block_date() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 1, 9, 4, 31).unwrap();
        assert_eq!(block_date(&ts), "February 1, 2024");
        assert_eq!(block_datetime(&ts), "2024-02-01 09:04:31 UTC");
    }

    #[test]
    fn test_tez_amount() {
        assert_eq!(tez_amount(1_500_000), "1.500000 tz");
        assert_eq!(tez_amount(0), "0.000000 tz");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("tz1YgDUQV2eXm8pUWNz3S5aWP86iFzNp4jnD"),
            "tz1YgDUQ...p4jnD"
        );
        assert_eq!(short_address("tz1short"), "tz1short");
    }
}
