//! Table resolution settings

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::table::{TableFamily, DEFAULT_LOG_TABLE_SIZE, DEFAULT_POW_TABLE_SIZE};

/// Resolution of the generated tables installed by
/// [`TableRegistry::configure`](crate::registry::TableRegistry::configure).
///
/// Missing fields fall back to the built-in sizes, so `{}` is a valid
/// configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Number of samples in the `log2(1 + t)` table
    pub log_size: usize,

    /// Number of samples in the `2^t` table
    pub pow_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            log_size: DEFAULT_LOG_TABLE_SIZE,
            pow_size: DEFAULT_POW_TABLE_SIZE,
        }
    }
}

impl TableConfig {
    /// Both tables with the same number of samples
    pub fn uniform(size: usize) -> Self {
        Self {
            log_size: size,
            pow_size: size,
        }
    }

    /// Requested size for `family`
    pub fn size(&self, family: TableFamily) -> usize {
        match family {
            TableFamily::Log => self.log_size,
            TableFamily::Pow => self.pow_size,
        }
    }

    /// Check that every table can be built
    pub fn validate(&self) -> Result<(), ConfigError> {
        for family in TableFamily::ALL {
            match self.size(family) {
                0 => return Err(ConfigError::EmptyTable),
                1 => return Err(ConfigError::TableTooSmall { size: 1 }),
                _ => {}
            }
        }
        Ok(())
    }
}
