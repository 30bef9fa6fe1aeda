//! Pipeline orchestration: validate, compute, format.
//!
//! Every function here is pure. Validation failures return the field errors
//! before any arithmetic runs, so a report is only ever built from inputs that
//! passed every rule.

use crate::estimate::error::EstimateError;
use crate::estimate::formatter::{format_magnitude, Domain};
use crate::estimate::types::{
    Estimate, ParsedStorage, ParsedTraffic, Request, StorageErrors, StorageField, StorageInputs,
    StorageReport, TrafficErrors, TrafficField, TrafficInputs, TrafficReport,
};
use crate::estimate::units::{TimeUnit, UnitTable};
use crate::estimate::validator::{validate_storage, validate_traffic};
use tracing::{debug, error};

/// Days in the month used for the per-month storage figure
pub const DAYS_PER_MONTH: f64 = 30.0;

const TOO_LARGE: &str = "is too large to estimate.";

/// Normalized rate behind a traffic report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficTotals {
    pub rate_per_second: f64,
}

impl TrafficTotals {
    /// Treats the count as "R requests per one `time_range`" and normalizes it to per second
    pub fn from_parsed(parsed: &ParsedTraffic) -> Self {
        Self {
            rate_per_second: parsed.num_requests / parsed.time_range.factor(),
        }
    }

    pub fn per(&self, unit: TimeUnit) -> f64 {
        self.rate_per_second * unit.factor()
    }

    fn is_finite(&self) -> bool {
        TimeUnit::ALL.iter().all(|&unit| self.per(unit).is_finite())
    }
}

/// Raw totals behind a storage report, in megabytes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageTotals {
    pub daily_mb: f64,
    pub monthly_mb: f64,
    /// One year of growth, times the retention years when given
    pub total_mb: f64,
}

impl StorageTotals {
    pub fn from_parsed(parsed: &ParsedStorage) -> Self {
        let item_mb = parsed.storage_per_item * parsed.unit.factor();
        // A zero multiplier wins over an overflowed product (inf * 0 is NaN)
        let daily_mb = if parsed.items_per_day == 0.0 {
            0.0
        } else {
            item_mb * parsed.items_per_day
        };
        let annual_mb = daily_mb * parsed.days_per_year;
        let total_mb = match parsed.years_to_store {
            Some(years) if years == 0.0 => 0.0,
            Some(years) => annual_mb * years,
            None => annual_mb,
        };

        Self {
            daily_mb,
            monthly_mb: daily_mb * DAYS_PER_MONTH,
            total_mb,
        }
    }

    fn is_finite(&self) -> bool {
        self.daily_mb.is_finite() && self.monthly_mb.is_finite() && self.total_mb.is_finite()
    }
}

fn traffic_report(totals: &TrafficTotals) -> Result<TrafficReport, EstimateError> {
    let count = |unit| format_magnitude(totals.per(unit), Domain::Count);
    Ok(TrafficReport {
        per_sec: count(TimeUnit::Second)?,
        per_min: count(TimeUnit::Minute)?,
        per_hour: count(TimeUnit::Hour)?,
        per_day: count(TimeUnit::Day)?,
        per_month: count(TimeUnit::Month)?,
        per_year: count(TimeUnit::Year)?,
    })
}

fn storage_report(totals: &StorageTotals) -> Result<StorageReport, EstimateError> {
    Ok(StorageReport {
        per_day: format_magnitude(totals.daily_mb, Domain::Storage)?,
        per_month: format_magnitude(totals.monthly_mb, Domain::Storage)?,
        per_year: format_magnitude(totals.total_mb, Domain::Storage)?,
    })
}

/// Report a contract violation: panic in debug builds, log it otherwise
fn contract_violation(err: &EstimateError) -> String {
    if cfg!(debug_assertions) {
        panic!("validated inputs failed to format: {}", err);
    }
    error!(%err, "validated inputs failed to format");
    format!("could not be estimated ({}).", err)
}

/// Estimate request rates for every period
pub fn compute_traffic(raw: &TrafficInputs) -> Result<TrafficReport, TrafficErrors> {
    debug!(?raw, "computing traffic");
    let parsed = validate_traffic(raw).inspect_err(|errors| {
        debug!(count = errors.len(), "traffic inputs rejected");
    })?;

    let totals = TrafficTotals::from_parsed(&parsed);
    let field = TrafficField::NumRequests;
    if !totals.is_finite() {
        let mut errors = TrafficErrors::default();
        errors.set(field, format!("{} {}", field.label(), TOO_LARGE));
        return Err(errors);
    }

    traffic_report(&totals).map_err(|err| {
        let mut errors = TrafficErrors::default();
        errors.set(field, format!("{} {}", field.label(), contract_violation(&err)));
        errors
    })
}

/// Estimate storage growth per day, month and year
pub fn compute_storage(raw: &StorageInputs) -> Result<StorageReport, StorageErrors> {
    debug!(?raw, "computing storage");
    let parsed = validate_storage(raw).inspect_err(|errors| {
        debug!(count = errors.len(), "storage inputs rejected");
    })?;

    let totals = StorageTotals::from_parsed(&parsed);
    let field = StorageField::StoragePerItem;
    if !totals.is_finite() {
        let mut errors = StorageErrors::default();
        errors.set(field, format!("{} {}", field.label(), TOO_LARGE));
        return Err(errors);
    }

    storage_report(&totals).map_err(|err| {
        let mut errors = StorageErrors::default();
        errors.set(field, format!("{} {}", field.label(), contract_violation(&err)));
        errors
    })
}

/// Run whichever pipeline `request` targets
pub fn compute(request: &Request) -> Estimate {
    match request {
        Request::Traffic(raw) => Estimate::Traffic(compute_traffic(raw)),
        Request::Storage(raw) => Estimate::Storage(compute_storage(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::units::SizeUnit;

    #[test]
    fn test_traffic_scenario() {
        let report = compute_traffic(&TrafficInputs::new("100", "per min")).unwrap();
        assert_eq!(report.per_sec, "1.67 req");
        assert_eq!(report.per_min, "100.00 req");
        assert_eq!(report.per_hour, "6.00 K req");
        assert_eq!(report.per_day, "144.00 K req");
        assert_eq!(report.per_month, "4.32 M req");
        assert_eq!(report.per_year, "52.56 M req");
    }

    #[test]
    fn test_traffic_per_second_input() {
        let report = compute_traffic(&TrafficInputs::new("5000", "per sec")).unwrap();
        assert_eq!(report.per_sec, "5.00 K req");
        assert_eq!(report.per_day, "432.00 M req");
        assert_eq!(report.per_year, "157.68 B req");
    }

    #[test]
    fn test_traffic_rejected_without_report() {
        let errors = compute_traffic(&TrafficInputs::new("", "per hour")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(TrafficField::NumRequests).is_some());
    }

    #[test]
    fn test_traffic_overflow_is_reported() {
        let errors = compute_traffic(&TrafficInputs::new("1e308", "per sec")).unwrap_err();
        assert_eq!(
            errors.get(TrafficField::NumRequests),
            Some("Number of requests is too large to estimate.")
        );
    }

    #[test]
    fn test_storage_scenario() {
        let raw = StorageInputs::new("2", "MB", "1000", "365", "");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "2.00 GB");
        assert_eq!(report.per_month, "60.00 GB");
        assert_eq!(report.per_year, "730.00 GB");
    }

    #[test]
    fn test_storage_retention_multiplies_year_only() {
        let raw = StorageInputs::new("2", "MB", "1000", "365", "5");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "2.00 GB");
        assert_eq!(report.per_month, "60.00 GB");
        assert_eq!(report.per_year, "3.65 TB");
    }

    #[test]
    fn test_storage_unit_conversion() {
        let raw = StorageInputs::new("512", "KB", "2000", "365", "");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "1.00 GB");

        let raw = StorageInputs::new("1", "TB", "1", "", "");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "1.05 TB");
    }

    #[test]
    fn test_storage_rejected_without_report() {
        let raw = StorageInputs::new("-5", "MB", "1000", "365", "");
        let errors = compute_storage(&raw).unwrap_err();
        assert!(errors.get(StorageField::StoragePerItem).is_some());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_storage_zero_items_with_huge_item_size() {
        let raw = StorageInputs::new("1e308", "TB", "0", "", "");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "0.00 MB");
        assert_eq!(report.per_month, "0.00 MB");
        assert_eq!(report.per_year, "0.00 MB");
    }

    #[test]
    fn test_storage_zero_retention() {
        let raw = StorageInputs::new("1e300", "MB", "1e8", "365", "0");
        let errors = compute_storage(&raw).unwrap_err();
        assert!(errors.get(StorageField::StoragePerItem).is_some());

        let raw = StorageInputs::new("2", "MB", "1000", "365", "0");
        let report = compute_storage(&raw).unwrap();
        assert_eq!(report.per_day, "2.00 GB");
        assert_eq!(report.per_year, "0.00 MB");
    }

    #[test]
    fn test_storage_totals() {
        let parsed = ParsedStorage {
            storage_per_item: 1.0,
            unit: SizeUnit::Gigabyte,
            items_per_day: 10.0,
            days_per_year: 360.0,
            years_to_store: Some(2.0),
        };
        let totals = StorageTotals::from_parsed(&parsed);
        assert_eq!(totals.daily_mb, 10_240.0);
        assert_eq!(totals.monthly_mb, 307_200.0);
        assert_eq!(totals.total_mb, 7_372_800.0);
    }

    #[test]
    fn test_compute_dispatch() {
        let estimate = compute(&Request::Traffic(TrafficInputs::new("1", "per sec")));
        assert!(estimate.is_ok());
        assert!(matches!(estimate, Estimate::Traffic(Ok(ref r)) if r.per_sec == "1.00 req"));

        let estimate = compute(&Request::Storage(StorageInputs::default()));
        assert!(!estimate.is_ok());
    }
}
