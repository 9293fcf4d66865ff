//! Upsert and read operations for episodic_patterns.

use rusqlite::{params, Connection, Row};

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Confidence, EpisodicPattern, PatternType};
use fincenter_core::traits::PatternFilter;

use super::{parse_datetime, OptionalRow};
use crate::{corrupt_row, to_storage_err};

const PATTERN_COLUMNS: &str =
    "id, pattern_type, subject, description, confidence, evidence_count, last_updated";

/// Insert or fully refresh a pattern by id. Evidence and confidence are
/// replaced, never accumulated.
pub fn upsert_pattern(conn: &Connection, pattern: &EpisodicPattern) -> FincenterResult<()> {
    conn.execute(
        "INSERT INTO episodic_patterns (
            id, pattern_type, subject, description, confidence, evidence_count, last_updated
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            pattern_type = excluded.pattern_type,
            subject = excluded.subject,
            description = excluded.description,
            confidence = excluded.confidence,
            evidence_count = excluded.evidence_count,
            last_updated = excluded.last_updated",
        params![
            pattern.id,
            pattern.pattern_type.as_str(),
            pattern.subject,
            pattern.description,
            pattern.confidence.value(),
            pattern.evidence_count,
            pattern.last_updated.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_pattern(conn: &Connection, id: &str) -> FincenterResult<Option<EpisodicPattern>> {
    let raw = conn
        .query_row(
            &format!("SELECT {PATTERN_COLUMNS} FROM episodic_patterns WHERE id = ?1"),
            params![id],
            RawPattern::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawPattern::into_pattern).transpose()
}

/// Patterns matching the filter, highest confidence first.
pub fn list_patterns(
    conn: &Connection,
    filter: &PatternFilter,
) -> FincenterResult<Vec<EpisodicPattern>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM episodic_patterns
             WHERE (?1 IS NULL OR pattern_type = ?1)
               AND (?2 IS NULL OR confidence >= ?2)
             ORDER BY confidence DESC, id ASC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![
                filter.pattern_type.map(PatternType::as_str),
                filter.min_confidence
            ],
            RawPattern::from_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut patterns = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        patterns.push(raw.into_pattern()?);
    }
    Ok(patterns)
}

/// Column values as stored, before enum and timestamp parsing.
struct RawPattern {
    id: String,
    pattern_type: String,
    subject: String,
    description: String,
    confidence: f64,
    evidence_count: u32,
    last_updated: String,
}

impl RawPattern {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pattern_type: row.get(1)?,
            subject: row.get(2)?,
            description: row.get(3)?,
            confidence: row.get(4)?,
            evidence_count: row.get(5)?,
            last_updated: row.get(6)?,
        })
    }

    fn into_pattern(self) -> FincenterResult<EpisodicPattern> {
        let pattern_type = PatternType::parse(&self.pattern_type).ok_or_else(|| {
            corrupt_row("episodic_patterns", format!("pattern_type '{}'", self.pattern_type))
        })?;
        Ok(EpisodicPattern {
            id: self.id,
            pattern_type,
            subject: self.subject,
            description: self.description,
            confidence: Confidence::new(self.confidence),
            evidence_count: self.evidence_count,
            last_updated: parse_datetime("episodic_patterns", &self.last_updated)?,
        })
    }
}
