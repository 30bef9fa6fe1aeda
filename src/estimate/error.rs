use thiserror::Error;

/// Contract violations inside the engine.
///
/// These never describe bad user input: the validator rejects that before any
/// lookup or formatting runs. Seeing one means the validator and the tables
/// disagree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),
    #[error("Cannot format {0}: value must be finite and non-negative")]
    Format(f64),
}
