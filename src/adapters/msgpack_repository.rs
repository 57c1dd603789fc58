//! MessagePack implementation of the Q-table repository.
//!
//! The artifact is the flat table record (`num_states`, `num_actions`,
//! row-major `values`) encoded with rmp_serde. There is no version header.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::QTable};

/// MessagePack-based Q-table repository.
///
/// # Examples
///
/// ```no_run
/// use cliffwalk::adapters::MsgPackRepository;
/// use cliffwalk::ports::QTableRepository;
/// use cliffwalk::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let table = QTable::new(48, 4)?;
///
/// repo.save(&table, Path::new("q_learning_q_table.msgpack"))?;
/// let loaded = repo.load(Path::new("q_learning_q_table.msgpack"))?;
/// assert_eq!(table, loaded);
/// # Ok::<(), cliffwalk::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let table: QTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        table.validate()?;

        Ok(table)
    }
}
