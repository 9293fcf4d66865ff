//! The single serialized write connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use fincenter_core::errors::FincenterResult;

use super::pragmas::apply_pragmas;
use crate::{poisoned, to_storage_err};

/// Exclusive write connection. SQLite allows one writer at a time, so all
/// writes funnel through this mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> FincenterResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> FincenterResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure with the write connection held.
    pub fn with_conn_sync<F, T>(&self, f: F) -> FincenterResult<T>
    where
        F: FnOnce(&Connection) -> FincenterResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| poisoned("write"))?;
        f(&guard)
    }
}
