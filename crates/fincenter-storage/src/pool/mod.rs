//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::PathBuf;

use fincenter_core::errors::FincenterResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open an in-memory pool. Readers are isolated databases in this mode,
    /// so the engine routes reads through the writer.
    pub fn open_in_memory() -> FincenterResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let readers = ReadPool::open_in_memory(1)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
