//! Repository port for Q-table persistence.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading learned Q-tables.
///
/// The stored artifact is the flat table only: its shape and its values.
///
/// # Examples
///
/// ```no_run
/// use cliffwalk::ports::QTableRepository;
/// use cliffwalk::QTable;
/// use std::path::Path;
///
/// fn save_table<R: QTableRepository>(repo: &R, table: &QTable) -> cliffwalk::Result<()> {
///     repo.save(table, Path::new("q_learning_q_table.msgpack"))
/// }
/// ```
pub trait QTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or does not
    /// contain a well-formed table.
    fn load(&self, path: &Path) -> Result<QTable>;
}
