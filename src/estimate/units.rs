use crate::estimate::error::EstimateError;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;

/// Seconds per month (30-day approximation)
pub const SECONDS_PER_MONTH: f64 = 30.0 * SECONDS_PER_DAY;

/// Seconds per year (365-day approximation)
pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

/// Megabytes per kilobyte
pub const MB_PER_KB: f64 = 1.0 / 1024.0;

/// Megabytes per gigabyte
pub const MB_PER_GB: f64 = 1024.0;

/// Megabytes per terabyte
pub const MB_PER_TB: f64 = 1024.0 * 1024.0;

/// A fixed conversion table: every unit has a label and a strictly positive
/// factor relative to the table's base unit.
pub trait UnitTable: Copy + Sized + 'static {
    /// Every unit in the table, in display order
    const ALL: &'static [Self];

    /// Human name of the table, used in messages
    const NAME: &'static str;

    fn label(self) -> &'static str;

    fn factor(self) -> f64;

    /// Whether `label` (already trimmed) selects this unit
    fn matches(self, label: &str) -> bool {
        self.label() == label
    }

    /// Look a unit up by its label, ignoring surrounding whitespace
    fn from_label(label: &str) -> Result<Self, EstimateError> {
        let trimmed = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.matches(trimmed))
            .ok_or_else(|| EstimateError::UnknownUnit(label.to_string()))
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|unit| unit.label()).collect()
    }
}

/// Scale factor for `label` in table `U`
pub fn factor_for<U: UnitTable>(label: &str) -> Result<f64, EstimateError> {
    U::from_label(label).map(U::factor)
}

/// Time-rate units, factors in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Hyphenated alias accepted alongside the label ("per-sec")
    pub fn alias(self) -> &'static str {
        match self {
            TimeUnit::Second => "per-sec",
            TimeUnit::Minute => "per-min",
            TimeUnit::Hour => "per-hour",
            TimeUnit::Day => "per-day",
            TimeUnit::Month => "per-month",
            TimeUnit::Year => "per-year",
        }
    }

    /// Period noun used when printing a rate ("per second")
    pub fn period(self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

impl UnitTable for TimeUnit {
    const ALL: &'static [Self] = &[
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    const NAME: &'static str = "time range";

    fn label(self) -> &'static str {
        match self {
            TimeUnit::Second => "per sec",
            TimeUnit::Minute => "per min",
            TimeUnit::Hour => "per hour",
            TimeUnit::Day => "per day",
            TimeUnit::Month => "per month",
            TimeUnit::Year => "per year",
        }
    }

    fn factor(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => SECONDS_PER_MINUTE,
            TimeUnit::Hour => SECONDS_PER_HOUR,
            TimeUnit::Day => SECONDS_PER_DAY,
            TimeUnit::Month => SECONDS_PER_MONTH,
            TimeUnit::Year => SECONDS_PER_YEAR,
        }
    }

    fn matches(self, label: &str) -> bool {
        self.label() == label || self.alias() == label
    }
}

/// Storage-size units, factors in megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeUnit {
    Kilobyte,
    #[default]
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl UnitTable for SizeUnit {
    const ALL: &'static [Self] = &[
        SizeUnit::Kilobyte,
        SizeUnit::Megabyte,
        SizeUnit::Gigabyte,
        SizeUnit::Terabyte,
    ];

    const NAME: &'static str = "storage unit";

    fn label(self) -> &'static str {
        match self {
            SizeUnit::Kilobyte => "KB",
            SizeUnit::Megabyte => "MB",
            SizeUnit::Gigabyte => "GB",
            SizeUnit::Terabyte => "TB",
        }
    }

    fn factor(self) -> f64 {
        match self {
            SizeUnit::Kilobyte => MB_PER_KB,
            SizeUnit::Megabyte => 1.0,
            SizeUnit::Gigabyte => MB_PER_GB,
            SizeUnit::Terabyte => MB_PER_TB,
        }
    }

    fn matches(self, label: &str) -> bool {
        self.label().eq_ignore_ascii_case(label)
    }
}
