//! Raw SQL operations, one module per table family. Every function takes a
//! borrowed connection so callers choose the reader or the writer.

pub mod cluster_ops;
pub mod ledger_ops;
pub mod pattern_ops;
pub mod recommendation_ops;

use chrono::{DateTime, NaiveDate, Utc};

use fincenter_core::errors::FincenterResult;

use crate::corrupt_row;

/// Date columns are stored as `YYYY-MM-DD` so they compare lexicographically.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(table: &str, s: &str) -> FincenterResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| corrupt_row(table, format!("date '{s}': {e}")))
}

pub(crate) fn parse_datetime(table: &str, s: &str) -> FincenterResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("timestamp '{s}': {e}")))
}

/// Helper trait to make `query_row` return `Option` on not-found.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
