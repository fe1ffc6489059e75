//! Error types for table configuration and checked evaluation

use thiserror::Error;

use crate::table::TableFamily;

/// Errors raised while installing or building lookup tables.
///
/// These are configuration-time failures and should abort startup rather
/// than let the engine run with a degraded table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The table has no samples at all
    #[error("lookup table is empty")]
    EmptyTable,

    /// The table needs at least two samples to interpolate between
    #[error("lookup table has {size} sample(s), at least 2 are required")]
    TableTooSmall {
        /// Number of samples supplied
        size: usize,
    },

    /// No table has been installed for this family
    #[error("no {family} table installed")]
    Unset {
        /// Family whose slot is empty
        family: TableFamily,
    },

    /// A family name could not be parsed
    #[error("unknown table family '{0}' (expected 'log' or 'pow')")]
    UnknownFamily(String),
}

/// Errors raised by the checked evaluation entry points when the input lies
/// outside the function's real domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// Logarithm of zero or a negative number
    #[error("logarithm of non-positive value {0}")]
    NonPositive(f32),

    /// NaN or infinite input
    #[error("non-finite input")]
    NonFinite,

    /// Negative base raised to a non-integral power
    #[error("negative base {base} raised to non-integral power {exponent}")]
    NegativeBase {
        /// The negative base
        base: f32,
        /// The non-integral exponent
        exponent: f32,
    },

    /// Zero raised to a negative power
    #[error("zero raised to negative power {0}")]
    ZeroToNegativePower(f32),
}

/// Any error produced by this crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Table configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Evaluation domain failure
    #[error(transparent)]
    Domain(#[from] DomainError),
}
