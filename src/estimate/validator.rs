use crate::estimate::detector::parse_number;
use crate::estimate::types::{
    ParsedStorage, ParsedTraffic, StorageErrors, StorageField, StorageInputs, TrafficErrors,
    TrafficField, TrafficInputs,
};
use crate::estimate::units::{SizeUnit, TimeUnit, UnitTable};
use thiserror::Error;

/// Days per year used when the field is left blank
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.0;

/// How a numeric field's text is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Required; a finite number >= 0
    NonNegative,
    /// A whole number > 0. Blank text yields `None`, callers substitute their default
    PositiveInteger,
    /// Blank means "not provided"; otherwise a finite number >= 0
    OptionalNonNegative,
}

/// Why a field's text failed its rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("is required")]
    Missing,
    #[error("must be a number")]
    NotANumber,
    #[error("must not be negative")]
    Negative,
    #[error("must be a whole number")]
    NotAnInteger,
    #[error("must be greater than zero")]
    NotPositive,
    #[error("must be selected")]
    NotSelected,
    #[error("'{given}' is not one of: {expected}")]
    UnknownChoice { given: String, expected: String },
}

/// Check `text` against `rule`.
///
/// `Ok(None)` only happens for rules that allow blank text.
pub fn check(rule: Rule, text: &str) -> Result<Option<f64>, Violation> {
    let text = text.trim();
    if text.is_empty() {
        return match rule {
            Rule::NonNegative => Err(Violation::Missing),
            Rule::PositiveInteger | Rule::OptionalNonNegative => Ok(None),
        };
    }

    let value = parse_number(text).ok_or(Violation::NotANumber)?;
    match rule {
        Rule::NonNegative | Rule::OptionalNonNegative if value < 0.0 => Err(Violation::Negative),
        Rule::PositiveInteger if value.fract() != 0.0 => Err(Violation::NotAnInteger),
        Rule::PositiveInteger if value <= 0.0 => Err(Violation::NotPositive),
        _ => Ok(Some(value)),
    }
}

/// Resolve a unit selection. Blank text picks `default`, or fails when there is none.
pub fn select<U: UnitTable>(text: &str, default: Option<U>) -> Result<U, Violation> {
    if text.trim().is_empty() {
        return default.ok_or(Violation::NotSelected);
    }
    U::from_label(text).map_err(|_| Violation::UnknownChoice {
        given: text.trim().to_string(),
        expected: U::labels().join(", "),
    })
}

fn message(label: &str, violation: &Violation) -> String {
    format!("{} {}.", label, violation)
}

/// Validate every traffic field, collecting all failures
pub fn validate_traffic(raw: &TrafficInputs) -> Result<ParsedTraffic, TrafficErrors> {
    let mut errors = TrafficErrors::default();

    let num_requests = match check(Rule::NonNegative, &raw.num_requests) {
        Ok(value) => value,
        Err(violation) => {
            let field = TrafficField::NumRequests;
            errors.set(field, message(field.label(), &violation));
            None
        }
    };

    let time_range = match select::<TimeUnit>(&raw.time_range, None) {
        Ok(unit) => Some(unit),
        Err(violation) => {
            let field = TrafficField::TimeRange;
            errors.set(field, message(field.label(), &violation));
            None
        }
    };

    match (num_requests, time_range) {
        (Some(num_requests), Some(time_range)) if errors.is_empty() => Ok(ParsedTraffic {
            num_requests,
            time_range,
        }),
        _ => Err(errors),
    }
}

/// Validate every storage field, collecting all failures and applying defaults
pub fn validate_storage(raw: &StorageInputs) -> Result<ParsedStorage, StorageErrors> {
    let mut errors = StorageErrors::default();

    let mut number = |field: StorageField, rule: Rule, text: &str| match check(rule, text) {
        Ok(value) => Ok(value),
        Err(violation) => {
            errors.set(field, message(field.label(), &violation));
            Err(())
        }
    };

    let storage_per_item = number(
        StorageField::StoragePerItem,
        Rule::NonNegative,
        &raw.storage_per_item,
    );
    let items_per_day = number(
        StorageField::ItemsPerDay,
        Rule::NonNegative,
        &raw.items_per_day,
    );
    let days_per_year = number(
        StorageField::DaysPerYear,
        Rule::PositiveInteger,
        &raw.days_per_year,
    );
    let years_to_store = number(
        StorageField::YearsToStore,
        Rule::OptionalNonNegative,
        &raw.years_to_store,
    );

    let unit = match select(&raw.unit, Some(SizeUnit::default())) {
        Ok(unit) => Some(unit),
        Err(violation) => {
            let field = StorageField::Unit;
            errors.set(field, message(field.label(), &violation));
            None
        }
    };

    match (storage_per_item, items_per_day, days_per_year, years_to_store, unit) {
        (Ok(Some(storage_per_item)), Ok(Some(items_per_day)), Ok(days), Ok(years), Some(unit))
            if errors.is_empty() =>
        {
            Ok(ParsedStorage {
                storage_per_item,
                unit,
                items_per_day,
                days_per_year: days.unwrap_or(DEFAULT_DAYS_PER_YEAR),
                years_to_store: years,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_rule() {
        assert_eq!(check(Rule::NonNegative, "0"), Ok(Some(0.0)));
        assert_eq!(check(Rule::NonNegative, " 12.5 "), Ok(Some(12.5)));
        assert_eq!(check(Rule::NonNegative, ""), Err(Violation::Missing));
        assert_eq!(check(Rule::NonNegative, "abc"), Err(Violation::NotANumber));
        assert_eq!(check(Rule::NonNegative, "-5"), Err(Violation::Negative));
    }

    #[test]
    fn test_positive_integer_rule() {
        assert_eq!(check(Rule::PositiveInteger, "365"), Ok(Some(365.0)));
        assert_eq!(check(Rule::PositiveInteger, ""), Ok(None));
        assert_eq!(check(Rule::PositiveInteger, "365.5"), Err(Violation::NotAnInteger));
        assert_eq!(check(Rule::PositiveInteger, "0"), Err(Violation::NotPositive));
        assert_eq!(check(Rule::PositiveInteger, "-1"), Err(Violation::NotPositive));
    }

    #[test]
    fn test_optional_rule() {
        assert_eq!(check(Rule::OptionalNonNegative, ""), Ok(None));
        assert_eq!(check(Rule::OptionalNonNegative, "   "), Ok(None));
        assert_eq!(check(Rule::OptionalNonNegative, "3"), Ok(Some(3.0)));
        assert_eq!(check(Rule::OptionalNonNegative, "-3"), Err(Violation::Negative));
        assert_eq!(check(Rule::OptionalNonNegative, "x"), Err(Violation::NotANumber));
    }

    #[test]
    fn test_select() {
        assert_eq!(select::<TimeUnit>("per min", None), Ok(TimeUnit::Minute));
        assert_eq!(select::<TimeUnit>("", None), Err(Violation::NotSelected));
        assert_eq!(select("", Some(SizeUnit::Megabyte)), Ok(SizeUnit::Megabyte));
        assert!(matches!(
            select::<SizeUnit>("PB", None),
            Err(Violation::UnknownChoice { given, .. }) if given == "PB"
        ));
    }

    #[test]
    fn test_traffic_collects_all_errors() {
        let errors = validate_traffic(&TrafficInputs::new("lots", "")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(TrafficField::NumRequests),
            Some("Number of requests must be a number.")
        );
        assert_eq!(
            errors.get(TrafficField::TimeRange),
            Some("Time range must be selected.")
        );
    }

    #[test]
    fn test_traffic_accepts_zero() {
        let parsed = validate_traffic(&TrafficInputs::new("0", "per day")).unwrap();
        assert_eq!(parsed.num_requests, 0.0);
        assert_eq!(parsed.time_range, TimeUnit::Day);
    }

    #[test]
    fn test_storage_defaults() {
        let parsed = validate_storage(&StorageInputs::new("2", "", "10", "", "")).unwrap();
        assert_eq!(parsed.unit, SizeUnit::Megabyte);
        assert_eq!(parsed.days_per_year, DEFAULT_DAYS_PER_YEAR);
        assert_eq!(parsed.years_to_store, None);
    }

    #[test]
    fn test_storage_collects_all_errors() {
        let raw = StorageInputs::new("-5", "PB", "", "1.5", "-2");
        let errors = validate_storage(&raw).unwrap_err();

        let keys: Vec<_> = errors.iter().map(|(field, _)| field.key()).collect();
        assert_eq!(
            keys,
            vec!["storagePerItem", "unit", "itemsPerDay", "daysPerYear", "yearsToStore"]
        );
        assert_eq!(
            errors.get(StorageField::StoragePerItem),
            Some("Storage per item must not be negative.")
        );
        assert_eq!(
            errors.get(StorageField::Unit),
            Some("Unit 'PB' is not one of: KB, MB, GB, TB.")
        );
    }

    #[test]
    fn test_validation_does_not_touch_inputs() {
        let raw = StorageInputs::new(" 2 ", "gb", "10", "360", "1");
        let before = raw.clone();
        let parsed = validate_storage(&raw).unwrap();
        assert_eq!(raw, before);
        assert_eq!(parsed.unit, SizeUnit::Gigabyte);
        assert_eq!(parsed.years_to_store, Some(1.0));
    }
}
