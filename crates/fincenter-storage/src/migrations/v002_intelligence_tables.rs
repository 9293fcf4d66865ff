//! v002: episodic_patterns, stress_clusters, recommendations.

use rusqlite::Connection;

use fincenter_core::errors::FincenterResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> FincenterResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS episodic_patterns (
            id             TEXT PRIMARY KEY,
            pattern_type   TEXT NOT NULL,
            subject        TEXT NOT NULL,
            description    TEXT NOT NULL,
            confidence     REAL NOT NULL,
            evidence_count INTEGER NOT NULL,
            last_updated   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_patterns_type ON episodic_patterns(pattern_type);
        CREATE INDEX IF NOT EXISTS idx_patterns_confidence ON episodic_patterns(confidence);

        CREATE TABLE IF NOT EXISTS stress_clusters (
            id           TEXT PRIMARY KEY,
            score        INTEGER NOT NULL,
            signals      TEXT NOT NULL DEFAULT '[]',
            detected_at  TEXT NOT NULL,
            acknowledged INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_clusters_active ON stress_clusters(acknowledged);

        CREATE TABLE IF NOT EXISTS recommendations (
            id                  TEXT PRIMARY KEY,
            category            TEXT NOT NULL,
            title               TEXT NOT NULL,
            description         TEXT NOT NULL,
            priority_score      REAL NOT NULL,
            expected_impact     REAL NOT NULL DEFAULT 0,
            confidence          REAL NOT NULL,
            supporting_evidence TEXT NOT NULL DEFAULT '[]',
            created_at          TEXT NOT NULL,
            acknowledged        INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_recommendations_category ON recommendations(category);
        CREATE INDEX IF NOT EXISTS idx_recommendations_ack ON recommendations(acknowledged);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
