// Back-of-envelope estimation engine
// validator -> units -> formatter, orchestrated per pipeline by the engine

pub mod detector;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod types;
pub mod units;
pub mod validator;


pub use detector::{looks_like_number, parse_number};
pub use engine::{compute, compute_storage, compute_traffic, StorageTotals, TrafficTotals};
pub use error::EstimateError;
pub use formatter::{format_magnitude, Domain};
pub use types::*;
pub use units::{factor_for, SizeUnit, TimeUnit, UnitTable};
pub use validator::{check, select, validate_storage, validate_traffic, Rule, Violation};
