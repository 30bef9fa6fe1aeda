use crate::estimate::units::{SizeUnit, TimeUnit};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt;

/// Raw traffic form text, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrafficInputs {
    pub num_requests: String,
    pub time_range: String,
}

impl TrafficInputs {
    pub fn new(num_requests: impl Into<String>, time_range: impl Into<String>) -> Self {
        Self {
            num_requests: num_requests.into(),
            time_range: time_range.into(),
        }
    }
}

/// Raw storage form text, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageInputs {
    pub storage_per_item: String,
    /// Blank selects megabytes
    pub unit: String,
    pub items_per_day: String,
    /// Blank selects 365
    pub days_per_year: String,
    /// Blank means no retention multiplier
    pub years_to_store: String,
}

impl StorageInputs {
    pub fn new(
        storage_per_item: impl Into<String>,
        unit: impl Into<String>,
        items_per_day: impl Into<String>,
        days_per_year: impl Into<String>,
        years_to_store: impl Into<String>,
    ) -> Self {
        Self {
            storage_per_item: storage_per_item.into(),
            unit: unit.into(),
            items_per_day: items_per_day.into(),
            days_per_year: days_per_year.into(),
            years_to_store: years_to_store.into(),
        }
    }
}

/// Traffic inputs after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedTraffic {
    pub num_requests: f64,
    pub time_range: TimeUnit,
}

/// Storage inputs after validation, defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedStorage {
    pub storage_per_item: f64,
    pub unit: SizeUnit,
    pub items_per_day: f64,
    pub days_per_year: f64,
    pub years_to_store: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficField {
    NumRequests,
    TimeRange,
}

impl TrafficField {
    pub const ALL: &'static [TrafficField] = &[TrafficField::NumRequests, TrafficField::TimeRange];

    /// Wire name of the field
    pub fn key(self) -> &'static str {
        match self {
            TrafficField::NumRequests => "numRequests",
            TrafficField::TimeRange => "timeRange",
        }
    }

    /// Human name used in messages
    pub fn label(self) -> &'static str {
        match self {
            TrafficField::NumRequests => "Number of requests",
            TrafficField::TimeRange => "Time range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageField {
    StoragePerItem,
    Unit,
    ItemsPerDay,
    DaysPerYear,
    YearsToStore,
}

impl StorageField {
    pub const ALL: &'static [StorageField] = &[
        StorageField::StoragePerItem,
        StorageField::Unit,
        StorageField::ItemsPerDay,
        StorageField::DaysPerYear,
        StorageField::YearsToStore,
    ];

    /// Wire name of the field
    pub fn key(self) -> &'static str {
        match self {
            StorageField::StoragePerItem => "storagePerItem",
            StorageField::Unit => "unit",
            StorageField::ItemsPerDay => "itemsPerDay",
            StorageField::DaysPerYear => "daysPerYear",
            StorageField::YearsToStore => "yearsToStore",
        }
    }

    /// Human name used in messages
    pub fn label(self) -> &'static str {
        match self {
            StorageField::StoragePerItem => "Storage per item",
            StorageField::Unit => "Unit",
            StorageField::ItemsPerDay => "Items per day",
            StorageField::DaysPerYear => "Days per year",
            StorageField::YearsToStore => "Years to store",
        }
    }
}

/// Per-field messages for a rejected traffic form; `None` means the field passed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
}

impl TrafficErrors {
    fn slot(&self, field: TrafficField) -> &Option<String> {
        match field {
            TrafficField::NumRequests => &self.num_requests,
            TrafficField::TimeRange => &self.time_range,
        }
    }

    pub fn set(&mut self, field: TrafficField, message: impl Into<String>) {
        let slot = match field {
            TrafficField::NumRequests => &mut self.num_requests,
            TrafficField::TimeRange => &mut self.time_range,
        };
        *slot = Some(message.into());
    }

    pub fn get(&self, field: TrafficField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Offending fields with their messages, in form order
    pub fn iter(&self) -> impl Iterator<Item = (TrafficField, &str)> + '_ {
        TrafficField::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|msg| (field, msg)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TrafficErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Errors:")?;
        for (field, message) in self.iter() {
            writeln!(f, "  [{}] {}", field.key(), message)?;
        }
        Ok(())
    }
}

/// Per-field messages for a rejected storage form; `None` means the field passed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_per_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_per_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_to_store: Option<String>,
}

impl StorageErrors {
    fn slot(&self, field: StorageField) -> &Option<String> {
        match field {
            StorageField::StoragePerItem => &self.storage_per_item,
            StorageField::Unit => &self.unit,
            StorageField::ItemsPerDay => &self.items_per_day,
            StorageField::DaysPerYear => &self.days_per_year,
            StorageField::YearsToStore => &self.years_to_store,
        }
    }

    pub fn set(&mut self, field: StorageField, message: impl Into<String>) {
        let slot = match field {
            StorageField::StoragePerItem => &mut self.storage_per_item,
            StorageField::Unit => &mut self.unit,
            StorageField::ItemsPerDay => &mut self.items_per_day,
            StorageField::DaysPerYear => &mut self.days_per_year,
            StorageField::YearsToStore => &mut self.years_to_store,
        };
        *slot = Some(message.into());
    }

    pub fn get(&self, field: StorageField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Offending fields with their messages, in form order
    pub fn iter(&self) -> impl Iterator<Item = (StorageField, &str)> + '_ {
        StorageField::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|msg| (field, msg)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for StorageErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Errors:")?;
        for (field, message) in self.iter() {
            writeln!(f, "  [{}] {}", field.key(), message)?;
        }
        Ok(())
    }
}

/// Estimated request rates, one formatted string per period
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficReport {
    pub per_sec: String,
    pub per_min: String,
    pub per_hour: String,
    pub per_day: String,
    pub per_month: String,
    pub per_year: String,
}

impl TrafficReport {
    /// (period, formatted value) pairs, shortest period first
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            (TimeUnit::Second.period(), self.per_sec.as_str()),
            (TimeUnit::Minute.period(), self.per_min.as_str()),
            (TimeUnit::Hour.period(), self.per_hour.as_str()),
            (TimeUnit::Day.period(), self.per_day.as_str()),
            (TimeUnit::Month.period(), self.per_month.as_str()),
            (TimeUnit::Year.period(), self.per_year.as_str()),
        ]
    }
}

/// Estimated storage totals, one formatted string per period
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageReport {
    pub per_day: String,
    pub per_month: String,
    /// Includes the retention multiplier when years-to-store was given
    pub per_year: String,
}

impl StorageReport {
    /// (period, formatted value) pairs, shortest period first
    pub fn rows(&self) -> [(&'static str, &str); 3] {
        [
            ("day", self.per_day.as_str()),
            ("month", self.per_month.as_str()),
            ("year", self.per_year.as_str()),
        ]
    }
}

/// Which estimator a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Traffic,
    Storage,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Traffic => write!(f, "traffic"),
            Pipeline::Storage => write!(f, "storage"),
        }
    }
}

/// Raw inputs for either pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Traffic(TrafficInputs),
    Storage(StorageInputs),
}

impl Request {
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Request::Traffic(_) => Pipeline::Traffic,
            Request::Storage(_) => Pipeline::Storage,
        }
    }
}

/// Outcome of one pipeline run: a report or the field errors, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimate {
    Traffic(Result<TrafficReport, TrafficErrors>),
    Storage(Result<StorageReport, StorageErrors>),
}

impl Estimate {
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Estimate::Traffic(_) => Pipeline::Traffic,
            Estimate::Storage(_) => Pipeline::Storage,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            Estimate::Traffic(outcome) => outcome.is_ok(),
            Estimate::Storage(outcome) => outcome.is_ok(),
        }
    }

    /// `{"ok": true, "result": {...}}` or `{"ok": false, "errors": {...}}`
    pub fn to_json(&self) -> JsonValue {
        match self {
            Estimate::Traffic(Ok(report)) => json!({ "ok": true, "result": report }),
            Estimate::Traffic(Err(errors)) => json!({ "ok": false, "errors": errors }),
            Estimate::Storage(Ok(report)) => json!({ "ok": true, "result": report }),
            Estimate::Storage(Err(errors)) => json!({ "ok": false, "errors": errors }),
        }
    }
}
