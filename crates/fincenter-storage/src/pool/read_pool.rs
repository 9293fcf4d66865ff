//! Round-robin set of read-only connections. Under WAL they never wait on the writer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use fincenter_core::errors::FincenterResult;

use super::pragmas::apply_read_pragmas;
use crate::{poisoned, to_storage_err};

/// Upper bound on reader connections.
const MAX_READERS: usize = 8;

pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `pool_size` (clamped to 1..=8) read-only connections to `path`.
    pub fn open(path: &Path, pool_size: usize) -> FincenterResult<Self> {
        Self::build(pool_size, || {
            Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        })
    }

    /// Each in-memory reader sees its own empty database, so callers route reads
    /// to the writer in that mode.
    pub fn open_in_memory(pool_size: usize) -> FincenterResult<Self> {
        Self::build(pool_size, Connection::open_in_memory)
    }

    fn build<F>(pool_size: usize, mut connect: F) -> FincenterResult<Self>
    where
        F: FnMut() -> rusqlite::Result<Connection>,
    {
        let readers = (0..pool_size.clamp(1, MAX_READERS))
            .map(|_| {
                let conn = connect().map_err(|e| to_storage_err(e.to_string()))?;
                apply_read_pragmas(&conn)?;
                Ok(Mutex::new(conn))
            })
            .collect::<FincenterResult<Vec<_>>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` against the next reader in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> FincenterResult<T>
    where
        F: FnOnce(&Connection) -> FincenterResult<T>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[slot].lock().map_err(|_| poisoned("read"))?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}
