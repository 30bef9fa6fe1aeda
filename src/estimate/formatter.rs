//! Magnitude-aware display strings.
//!
//! Each domain has a ladder of exclusive upper thresholds; the first rung the
//! value falls under picks the divisor and suffix. Values are printed with
//! `{:.2}`, which rounds the exact binary value to two decimals (ties to
//! even), so `999_999.99` requests print as `"1000.00 K req"` rather than
//! moving up a rung.

use crate::estimate::error::EstimateError;
use serde::{Deserialize, Serialize};

/// What a formatted number measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Request counts
    Count,
    /// Storage amounts, given in megabytes
    Storage,
}

struct Rung {
    below: f64,
    divisor: f64,
    suffix: &'static str,
}

const COUNT_LADDER: &[Rung] = &[
    Rung { below: 1e3, divisor: 1.0, suffix: "req" },
    Rung { below: 1e6, divisor: 1e3, suffix: "K req" },
    Rung { below: 1e9, divisor: 1e6, suffix: "M req" },
    Rung { below: f64::INFINITY, divisor: 1e9, suffix: "B req" },
];

const STORAGE_LADDER: &[Rung] = &[
    Rung { below: 1e3, divisor: 1.0, suffix: "MB" },
    Rung { below: 1e6, divisor: 1e3, suffix: "GB" },
    Rung { below: f64::INFINITY, divisor: 1e6, suffix: "TB" },
];

impl Domain {
    fn ladder(self) -> &'static [Rung] {
        match self {
            Domain::Count => COUNT_LADDER,
            Domain::Storage => STORAGE_LADDER,
        }
    }
}

/// Format `value` for display in `domain`
pub fn format_magnitude(value: f64, domain: Domain) -> Result<String, EstimateError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimateError::Format(value));
    }
    // -0.0 passes the sign check but would print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };

    // Every ladder ends in an INFINITY rung, so a finite value always lands on one
    let ladder = domain.ladder();
    let rung = ladder
        .iter()
        .find(|rung| value < rung.below)
        .unwrap_or(&ladder[ladder.len() - 1]);

    Ok(format!("{:.2} {}", value / rung.divisor, rung.suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(value: f64) -> String {
        format_magnitude(value, Domain::Count).unwrap()
    }

    fn storage(value: f64) -> String {
        format_magnitude(value, Domain::Storage).unwrap()
    }

    #[test]
    fn test_count_ladder() {
        assert_eq!(count(0.0), "0.00 req");
        assert_eq!(count(-0.0), "0.00 req");
        assert_eq!(count(0.125), "0.12 req");
        assert_eq!(count(0.375), "0.38 req");
        assert_eq!(count(1.005), "1.00 req");
        assert_eq!(count(1.0 / 60.0), "0.02 req");
        assert_eq!(count(12_346.0), "12.35 K req");
        assert_eq!(count(2_500_000.0), "2.50 M req");
        assert_eq!(count(7_000_000_000.0), "7.00 B req");
        assert_eq!(count(3e12), "3000.00 B req");
    }

    #[test]
    fn test_count_boundaries() {
        assert_eq!(count(999.99), "999.99 req");
        assert_eq!(count(1000.0), "1.00 K req");
        assert_eq!(count(999_999.99), "1000.00 K req");
        assert_eq!(count(1_000_000.0), "1.00 M req");
        assert_eq!(count(999_999_999.0), "1000.00 M req");
        assert_eq!(count(1_000_000_000.0), "1.00 B req");
    }

    #[test]
    fn test_storage_ladder() {
        assert_eq!(storage(0.5), "0.50 MB");
        assert_eq!(storage(999.99), "999.99 MB");
        assert_eq!(storage(1000.0), "1.00 GB");
        assert_eq!(storage(730_000.0), "730.00 GB");
        assert_eq!(storage(999_999.99), "1000.00 GB");
        assert_eq!(storage(1_000_000.0), "1.00 TB");
        assert_eq!(storage(42_000_000.0), "42.00 TB");
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert_eq!(
            format_magnitude(-1.0, Domain::Count),
            Err(EstimateError::Format(-1.0))
        );
        assert!(format_magnitude(f64::INFINITY, Domain::Storage).is_err());
        assert!(format_magnitude(f64::NAN, Domain::Count).is_err());
    }
}
