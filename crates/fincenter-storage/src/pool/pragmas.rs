//! Connection-level PRAGMAs. The writer owns journal mode; readers only tune
//! cache and lock waiting.

use rusqlite::Connection;

use fincenter_core::errors::FincenterResult;

use crate::to_storage_err;

const WRITER_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
    PRAGMA cache_size = -32000;
    PRAGMA busy_timeout = 5000;
";

const READER_PRAGMAS: &str = "
    PRAGMA cache_size = -8000;
    PRAGMA busy_timeout = 5000;
";

fn run_batch(conn: &Connection, batch: &str) -> FincenterResult<()> {
    conn.execute_batch(batch)
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn apply_pragmas(conn: &Connection) -> FincenterResult<()> {
    run_batch(conn, WRITER_PRAGMAS)
}

pub fn apply_read_pragmas(conn: &Connection) -> FincenterResult<()> {
    run_batch(conn, READER_PRAGMAS)
}

/// True when the connection reports `journal_mode = wal`.
pub fn verify_wal_mode(conn: &Connection) -> FincenterResult<bool> {
    conn.pragma_query_value(None, "journal_mode", |row| row.get::<_, String>(0))
        .map(|mode| mode.eq_ignore_ascii_case("wal"))
        .map_err(|e| to_storage_err(e.to_string()))
}
