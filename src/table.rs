//! Lookup tables for the log2 and exp2 approximations
//!
//! A table holds uniformly spaced samples of one function over the
//! normalized domain [0, 1], both ends included: sample `i` of a table with
//! `size` samples sits at `i / (size - 1)`. Lookups interpolate linearly
//! between neighbouring samples.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of samples in the built-in log2 table (1024 segments)
pub const DEFAULT_LOG_TABLE_SIZE: usize = 1025;

/// Number of samples in the built-in exp2 table (1024 segments)
pub const DEFAULT_POW_TABLE_SIZE: usize = 1025;

static DEFAULT_LOG_TABLE: OnceLock<ApproxTable> = OnceLock::new();
static DEFAULT_POW_TABLE: OnceLock<ApproxTable> = OnceLock::new();

/// The function family a table approximates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFamily {
    /// `log2(1 + t)`, used for logarithms and the first half of pow
    Log,
    /// `2^t`, used for exponentials and the second half of pow
    Pow,
}

impl TableFamily {
    /// Both families, in registry order
    pub const ALL: [TableFamily; 2] = [TableFamily::Log, TableFamily::Pow];

    /// Lowercase name as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            TableFamily::Log => "log",
            TableFamily::Pow => "pow",
        }
    }

    /// Reference value of the tabulated function at `t` in [0, 1]
    pub fn reference(self, t: f64) -> f64 {
        match self {
            TableFamily::Log => (1.0 + t).log2(),
            TableFamily::Pow => t.exp2(),
        }
    }

    /// Built-in table size for this family
    pub fn default_size(self) -> usize {
        match self {
            TableFamily::Log => DEFAULT_LOG_TABLE_SIZE,
            TableFamily::Pow => DEFAULT_POW_TABLE_SIZE,
        }
    }
}

impl fmt::Display for TableFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log2" => Ok(TableFamily::Log),
            "pow" | "exp2" => Ok(TableFamily::Pow),
            _ => Err(ConfigError::UnknownFamily(s.to_string())),
        }
    }
}

/// Immutable, uniformly sampled lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct ApproxTable {
    samples: Cow<'static, [f32]>,
    /// `size - 1` as a float, kept to avoid a conversion per lookup
    segments: f32,
}

impl ApproxTable {
    /// Wraps a sequence of samples covering [0, 1].
    ///
    /// No check is made that the samples actually describe the function the
    /// table is installed for; only the size is validated.
    pub fn new(samples: impl Into<Cow<'static, [f32]>>) -> Result<Self, ConfigError> {
        let samples = samples.into();
        match samples.len() {
            0 => Err(ConfigError::EmptyTable),
            1 => Err(ConfigError::TableTooSmall { size: 1 }),
            n => Ok(Self {
                segments: (n - 1) as f32,
                samples,
            }),
        }
    }

    /// Wraps a compiled-in table without copying it
    pub fn from_static(samples: &'static [f32]) -> Result<Self, ConfigError> {
        Self::new(samples)
    }

    /// Samples `family`'s function at `size` evenly spaced points.
    ///
    /// Sizes of `2^k + 1` make the segment count a power of two, which keeps
    /// index computation exact.
    pub fn generate(family: TableFamily, size: usize) -> Result<Self, ConfigError> {
        match size {
            0 => Err(ConfigError::EmptyTable),
            1 => Err(ConfigError::TableTooSmall { size }),
            _ => Ok(Self::sampled(family, size)),
        }
    }

    /// `log2(1 + t)` table with `size` samples
    pub fn log2(size: usize) -> Result<Self, ConfigError> {
        Self::generate(TableFamily::Log, size)
    }

    /// `2^t` table with `size` samples
    pub fn exp2(size: usize) -> Result<Self, ConfigError> {
        Self::generate(TableFamily::Pow, size)
    }

    fn sampled(family: TableFamily, size: usize) -> Self {
        debug_assert!(size >= 2);
        let last = (size - 1) as f64;
        let samples: Vec<f32> = (0..size)
            .map(|i| family.reference(i as f64 / last) as f32)
            .collect();
        debug!("TABLE: generated {} table with {} samples", family, size);
        Self {
            samples: Cow::Owned(samples),
            segments: last as f32,
        }
    }

    /// Raw samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    /// Number of interpolation segments (`size - 1`)
    pub fn segments(&self) -> usize {
        self.samples.len() - 1
    }

    /// Memory held by the samples, in bytes
    pub fn footprint(&self) -> usize {
        std::mem::size_of_val(self.samples.as_ref())
    }

    /// Linear interpolation at `t` in [0, 1].
    ///
    /// The segment index is clamped to `[0, size - 2]`, so `t == 1.0` lands on
    /// the last sample instead of reading past the end.
    #[inline]
    pub fn interpolate(&self, t: f32) -> f32 {
        let samples: &[f32] = &self.samples;
        let position = t * self.segments;
        let index = (position as usize).min(samples.len() - 2);
        let remainder = position - index as f32;
        let a = samples[index];
        let b = samples[index + 1];
        a + (b - a) * remainder
    }
}

/// Built-in `log2(1 + t)` table, generated on first use
pub fn default_log_table() -> &'static ApproxTable {
    DEFAULT_LOG_TABLE.get_or_init(|| ApproxTable::sampled(TableFamily::Log, DEFAULT_LOG_TABLE_SIZE))
}

/// Built-in `2^t` table, generated on first use
pub fn default_pow_table() -> &'static ApproxTable {
    DEFAULT_POW_TABLE.get_or_init(|| ApproxTable::sampled(TableFamily::Pow, DEFAULT_POW_TABLE_SIZE))
}

/// Built-in table for `family`
pub fn default_table(family: TableFamily) -> &'static ApproxTable {
    match family {
        TableFamily::Log => default_log_table(),
        TableFamily::Pow => default_pow_table(),
    }
}
