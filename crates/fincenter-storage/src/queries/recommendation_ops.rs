//! Upsert, read, and acknowledge operations for recommendations.

use rusqlite::{params, Connection, Row};

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Confidence, Recommendation, RecommendationCategory};
use fincenter_core::traits::RecommendationFilter;

use super::{parse_datetime, OptionalRow};
use crate::{corrupt_row, to_storage_err};

const RECOMMENDATION_COLUMNS: &str = "id, category, title, description, priority_score, \
     expected_impact, confidence, supporting_evidence, created_at, acknowledged";

/// Insert or refresh a recommendation by id.
///
/// Regeneration rewrites every field except an existing `acknowledged = 1`,
/// and keeps the original `created_at`.
pub fn upsert_recommendation(conn: &Connection, rec: &Recommendation) -> FincenterResult<()> {
    let evidence_json = serde_json::to_string(&rec.supporting_evidence)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO recommendations (
            id, category, title, description, priority_score, expected_impact,
            confidence, supporting_evidence, created_at, acknowledged
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            category = excluded.category,
            title = excluded.title,
            description = excluded.description,
            priority_score = excluded.priority_score,
            expected_impact = excluded.expected_impact,
            confidence = excluded.confidence,
            supporting_evidence = excluded.supporting_evidence,
            acknowledged = MAX(recommendations.acknowledged, excluded.acknowledged)",
        params![
            rec.id,
            rec.category.as_str(),
            rec.title,
            rec.description,
            rec.priority_score,
            rec.expected_impact,
            rec.confidence.value(),
            evidence_json,
            rec.created_at.to_rfc3339(),
            rec.acknowledged as i32,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_recommendation(conn: &Connection, id: &str) -> FincenterResult<Option<Recommendation>> {
    let raw = conn
        .query_row(
            &format!("SELECT {RECOMMENDATION_COLUMNS} FROM recommendations WHERE id = ?1"),
            params![id],
            RawRecommendation::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawRecommendation::into_recommendation).transpose()
}

/// Recommendations matching the filter, highest priority first.
pub fn list_recommendations(
    conn: &Connection,
    filter: &RecommendationFilter,
) -> FincenterResult<Vec<Recommendation>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RECOMMENDATION_COLUMNS} FROM recommendations
             WHERE (?1 IS NULL OR acknowledged = ?1)
               AND (?2 IS NULL OR category = ?2)
             ORDER BY priority_score DESC, id ASC
             LIMIT ?3"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    // SQLite treats a negative LIMIT as unbounded.
    let limit = filter.limit.map_or(-1, |l| l as i64);
    let rows = stmt
        .query_map(
            params![
                filter.acknowledged.map(i32::from),
                filter.category.map(RecommendationCategory::as_str),
                limit
            ],
            RawRecommendation::from_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut recs = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        recs.push(raw.into_recommendation()?);
    }
    Ok(recs)
}

/// Mark a recommendation acknowledged. Returns `false` if the id is unknown.
pub fn acknowledge_recommendation(conn: &Connection, id: &str) -> FincenterResult<bool> {
    let updated = conn
        .execute(
            "UPDATE recommendations SET acknowledged = 1 WHERE id = ?1",
            params![id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(updated > 0)
}

struct RawRecommendation {
    id: String,
    category: String,
    title: String,
    description: String,
    priority_score: f64,
    expected_impact: f64,
    confidence: f64,
    supporting_evidence: String,
    created_at: String,
    acknowledged: i32,
}

impl RawRecommendation {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            category: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            priority_score: row.get(4)?,
            expected_impact: row.get(5)?,
            confidence: row.get(6)?,
            supporting_evidence: row.get(7)?,
            created_at: row.get(8)?,
            acknowledged: row.get(9)?,
        })
    }

    fn into_recommendation(self) -> FincenterResult<Recommendation> {
        let category = RecommendationCategory::parse(&self.category)
            .ok_or_else(|| corrupt_row("recommendations", format!("category '{}'", self.category)))?;
        let supporting_evidence: Vec<String> = serde_json::from_str(&self.supporting_evidence)
            .map_err(|e| corrupt_row("recommendations", format!("supporting_evidence: {e}")))?;
        Ok(Recommendation {
            id: self.id,
            category,
            title: self.title,
            description: self.description,
            priority_score: self.priority_score,
            expected_impact: self.expected_impact,
            confidence: Confidence::new(self.confidence),
            supporting_evidence,
            created_at: parse_datetime("recommendations", &self.created_at)?,
            acknowledged: self.acknowledged != 0,
        })
    }
}
