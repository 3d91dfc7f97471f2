use crate::db::{json_column, to_json};
use common::model::analysis::AiAnalysis;
use rusqlite::{params, Connection};

pub fn insert(conn: &Connection, analysis: &AiAnalysis) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO ai_analyses
         (id, data_source_id, summary, insights, suggested_chart_types, data_quality_notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            analysis.id,
            analysis.data_source_id,
            analysis.summary,
            to_json(&analysis.insights)?,
            to_json(&analysis.suggested_chart_types)?,
            to_json(&analysis.data_quality_notes)?,
            analysis.created_at,
        ],
    )?;
    Ok(())
}

/// Analyses of a source, newest first.
pub fn list_for_source(conn: &Connection, data_source_id: &str) -> rusqlite::Result<Vec<AiAnalysis>> {
    let mut stmt = conn.prepare(
        "SELECT id, data_source_id, summary, insights, suggested_chart_types,
                data_quality_notes, created_at
         FROM ai_analyses
         WHERE data_source_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![data_source_id], |row| {
        Ok(AiAnalysis {
            id: row.get(0)?,
            data_source_id: row.get(1)?,
            summary: row.get(2)?,
            insights: json_column(row, 3)?,
            suggested_chart_types: json_column(row, 4)?,
            data_quality_notes: json_column(row, 5)?,
            created_at: row.get(6)?,
        })
    })?;
    rows.collect()
}
