use thiserror::Error;

/// Rejected [`TitrationConfig`](crate::titration::TitrationConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A quantity that must be a finite, strictly positive number was not.
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// The phenolphthalein transition window is empty or inverted.
    #[error("indicator window is empty: start pH {start} must be below end pH {end}")]
    EmptyIndicatorWindow { start: f64, end: f64 },

    /// The burette cannot start fuller than its own capacity.
    #[error("burette initial volume {initial_ml} mL exceeds capacity {capacity_ml} mL")]
    BuretteOverfilled { initial_ml: f64, capacity_ml: f64 },

    #[error("invalid hex colour: {0:?}")]
    InvalidColor(String),
}

/// Why a panel amount field could not be turned into a volume.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a number: {0:?}")]
    NotANumber(String),

    /// Zero, negative and non-finite amounts are all refused.
    #[error("amount must be greater than zero, got {0}")]
    NotPositive(f64),
}
