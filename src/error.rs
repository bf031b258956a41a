use thiserror::Error;

/// Errors raised at the edges of the feature engine.
///
/// The transforms themselves never fail: degenerate books map to neutral values.
/// Errors only come from turning caller input into typed values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    /// A side string that is neither `buy` nor `sell`.
    #[error("invalid side '{0}': expected 'buy' or 'sell'")]
    InvalidSide(String),

    /// A float that cannot be represented as a `Decimal` (NaN, infinite, out of range).
    #[error("invalid {field}: {value} is not a finite decimal")]
    InvalidNumber {
        /// Which input was rejected.
        field: &'static str,
        /// The rejected value, as given.
        value: f64,
    },

    /// A configuration value outside its allowed range.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },
}
