//! Process-wide table registry
//!
//! Each function family has one [`TableSlot`] holding the currently active
//! table. Slots are written rarely (normally once, at startup) and read on
//! every evaluation, so reads are a single atomic load with no locking.
//!
//! Installed tables must live for the rest of the process. Replacing a table
//! swaps a pointer and never touches the old table, so a thread evaluating
//! concurrently with a swap sees either the old table or the new one, never
//! a mix. Applications that need every evaluation to agree on a table should
//! still finish configuration before spawning evaluating threads.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use log::debug;

use crate::config::TableConfig;
use crate::error::{ConfigError, DomainError};
use crate::maths::FastMaths;
use crate::table::{default_table, ApproxTable, TableFamily};

static REGISTRY: TableRegistry = TableRegistry::new();

/// Holds the active table for one function family
#[derive(Debug)]
pub struct TableSlot {
    table: AtomicPtr<ApproxTable>,
}

impl TableSlot {
    /// An empty slot
    pub const fn new() -> Self {
        Self {
            table: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Replace the active table, returning the previous one
    pub fn install(&self, table: &'static ApproxTable) -> Option<&'static ApproxTable> {
        let previous = self
            .table
            .swap(table as *const ApproxTable as *mut ApproxTable, Ordering::AcqRel);
        // SAFETY: the slot only ever holds null or pointers derived from
        // `&'static ApproxTable`, and nothing writes through them.
        unsafe { previous.as_ref() }
    }

    /// The active table, if one has been installed
    #[inline]
    pub fn get(&self) -> Option<&'static ApproxTable> {
        let table = self.table.load(Ordering::Acquire);
        // SAFETY: see `install`
        unsafe { table.as_ref() }
    }
}

impl Default for TableSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`TableSlot`] per [`TableFamily`]
#[derive(Debug, Default)]
pub struct TableRegistry {
    log: TableSlot,
    pow: TableSlot,
}

impl TableRegistry {
    /// A registry with both slots empty
    pub const fn new() -> Self {
        Self {
            log: TableSlot::new(),
            pow: TableSlot::new(),
        }
    }

    fn slot(&self, family: TableFamily) -> &TableSlot {
        match family {
            TableFamily::Log => &self.log,
            TableFamily::Pow => &self.pow,
        }
    }

    /// Install an already validated table, returning the one it replaces.
    ///
    /// Callers that swap between tables they own can hand the returned table
    /// back to their own pool instead of leaking a new one per swap.
    pub fn install(
        &self,
        family: TableFamily,
        table: &'static ApproxTable,
    ) -> Option<&'static ApproxTable> {
        debug!(
            "REGISTRY: installing {} table with {} samples",
            family,
            table.size()
        );
        self.slot(family).install(table)
    }

    /// Install a table built at runtime.
    ///
    /// The table is leaked so it can be shared with every reader for the rest
    /// of the process. To alternate between a fixed set of tables, leak each
    /// once and swap them with [`install`](Self::install).
    pub fn install_owned(&self, family: TableFamily, table: ApproxTable) -> &'static ApproxTable {
        let table: &'static ApproxTable = Box::leak(Box::new(table));
        self.install(family, table);
        table
    }

    /// Install a compiled-in sample array for `family`.
    ///
    /// Only the size is validated. A small table header is leaked per call,
    /// which is fine for configure-once use but not for swapping in a loop.
    pub fn set_table(&self, family: TableFamily, samples: &'static [f32]) -> Result<(), ConfigError> {
        let table = ApproxTable::from_static(samples)?;
        self.install_owned(family, table);
        Ok(())
    }

    /// Active table for `family`
    #[inline]
    pub fn table(&self, family: TableFamily) -> Option<&'static ApproxTable> {
        self.slot(family).get()
    }

    /// Whether both families have a table installed
    pub fn is_configured(&self) -> bool {
        TableFamily::ALL
            .iter()
            .all(|&family| self.table(family).is_some())
    }

    /// Install the built-in tables for both families
    pub fn set_default_tables(&self) {
        for family in TableFamily::ALL {
            self.install(family, default_table(family));
        }
    }

    /// Install generated tables at the resolutions in `config`.
    ///
    /// Sizes equal to the built-in ones reuse the built-in tables.
    pub fn configure(&self, config: &TableConfig) -> Result<(), ConfigError> {
        config.validate()?;
        for family in TableFamily::ALL {
            let size = config.size(family);
            if size == family.default_size() {
                self.install(family, default_table(family));
            } else {
                self.install_owned(family, ApproxTable::generate(family, size)?);
            }
        }
        Ok(())
    }

    /// Evaluator over the installed tables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Unset`] naming the first family without a table.
    pub fn maths(&self) -> Result<FastMaths<'static>, ConfigError> {
        let log = self.table(TableFamily::Log).ok_or(ConfigError::Unset {
            family: TableFamily::Log,
        })?;
        let pow = self.table(TableFamily::Pow).ok_or(ConfigError::Unset {
            family: TableFamily::Pow,
        })?;
        Ok(FastMaths::new(log, pow))
    }

    /// Evaluator over the installed tables, substituting the built-in table
    /// for any empty slot
    #[inline]
    pub fn maths_or_default(&self) -> FastMaths<'static> {
        let log = self
            .table(TableFamily::Log)
            .unwrap_or_else(|| default_table(TableFamily::Log));
        let pow = self
            .table(TableFamily::Pow)
            .unwrap_or_else(|| default_table(TableFamily::Pow));
        FastMaths::new(log, pow)
    }
}

/// The process-wide registry used by [`FastFloat`](crate::FastFloat),
/// [`approx_log`] and [`approx_pow`]
pub fn registry() -> &'static TableRegistry {
    &REGISTRY
}

/// Set the log table of the process-wide registry
pub fn set_log_table(table: &'static [f32]) -> Result<(), ConfigError> {
    REGISTRY.set_table(TableFamily::Log, table)
}

/// Set the pow table of the process-wide registry
pub fn set_pow_table(table: &'static [f32]) -> Result<(), ConfigError> {
    REGISTRY.set_table(TableFamily::Pow, table)
}

/// Set the default pow/log tables of the process-wide registry.
///
/// Call once during initialization, before any evaluation. Evaluating with
/// an empty slot falls back to these same tables.
pub fn set_default_tables() {
    REGISTRY.set_default_tables()
}

/// Approximate `log2(x)` with the process-wide tables
#[inline]
pub fn approx_log(x: f32) -> Result<f32, DomainError> {
    REGISTRY.maths_or_default().log2(x)
}

/// Approximate `x^y` with the process-wide tables
#[inline]
pub fn approx_pow(x: f32, y: f32) -> Result<f32, DomainError> {
    REGISTRY.maths_or_default().pow(x, y)
}
