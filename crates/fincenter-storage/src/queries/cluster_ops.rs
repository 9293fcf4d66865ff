//! Upsert, read, and acknowledge operations for stress_clusters.

use rusqlite::{params, Connection, Row};

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, StressCluster};

use super::{parse_datetime, OptionalRow};
use crate::{corrupt_row, to_storage_err};

const CLUSTER_COLUMNS: &str = "id, score, signals, detected_at, acknowledged";

/// Insert or refresh a cluster by id. An existing acknowledgement survives.
pub fn upsert_cluster(conn: &Connection, cluster: &StressCluster) -> FincenterResult<()> {
    let signals_json =
        serde_json::to_string(&cluster.signals).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO stress_clusters (id, score, signals, detected_at, acknowledged)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            score = excluded.score,
            signals = excluded.signals,
            detected_at = excluded.detected_at,
            acknowledged = MAX(stress_clusters.acknowledged, excluded.acknowledged)",
        params![
            cluster.id,
            cluster.score,
            signals_json,
            cluster.detected_at.to_rfc3339(),
            cluster.acknowledged as i32,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_cluster(conn: &Connection, id: &str) -> FincenterResult<Option<StressCluster>> {
    let raw = conn
        .query_row(
            &format!("SELECT {CLUSTER_COLUMNS} FROM stress_clusters WHERE id = ?1"),
            params![id],
            RawCluster::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawCluster::into_cluster).transpose()
}

/// Clusters ordered by score (highest first), then most recent detection.
pub fn list_clusters(conn: &Connection, active_only: bool) -> FincenterResult<Vec<StressCluster>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CLUSTER_COLUMNS} FROM stress_clusters
             WHERE (?1 = 0 OR acknowledged = 0)
             ORDER BY score DESC, detected_at DESC, id ASC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![active_only as i32], RawCluster::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut clusters = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        clusters.push(raw.into_cluster()?);
    }
    Ok(clusters)
}

/// Mark a cluster acknowledged. Returns `false` if the id is unknown.
pub fn acknowledge_cluster(conn: &Connection, id: &str) -> FincenterResult<bool> {
    let updated = conn
        .execute(
            "UPDATE stress_clusters SET acknowledged = 1 WHERE id = ?1",
            params![id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(updated > 0)
}

struct RawCluster {
    id: String,
    score: u32,
    signals: String,
    detected_at: String,
    acknowledged: i32,
}

impl RawCluster {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            score: row.get(1)?,
            signals: row.get(2)?,
            detected_at: row.get(3)?,
            acknowledged: row.get(4)?,
        })
    }

    fn into_cluster(self) -> FincenterResult<StressCluster> {
        let signals: Vec<Signal> = serde_json::from_str(&self.signals)
            .map_err(|e| corrupt_row("stress_clusters", format!("signals: {e}")))?;
        Ok(StressCluster {
            id: self.id,
            score: self.score,
            signals,
            detected_at: parse_datetime("stress_clusters", &self.detected_at)?,
            acknowledged: self.acknowledged != 0,
        })
    }
}
