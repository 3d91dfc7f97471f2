use crate::db::{json_column, now, optional_json_column, to_json, to_optional_json};
use common::model::datasource::{DataSource, DataSourceMetadata, DataSourceStatus};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

const COLUMNS: &str = "id, user_id, organization_id, name, kind, format, raw_payload, metadata, \
                       status, error_message, created_at, updated_at";

fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DataSource> {
    Ok(DataSource {
        id: row.get(0)?,
        user_id: row.get(1)?,
        organization_id: row.get(2)?,
        name: row.get(3)?,
        kind: string_enum(row, 4)?,
        format: string_enum(row, 5)?,
        raw_payload: optional_json_column(row, 6)?,
        metadata: json_column(row, 7)?,
        status: string_enum(row, 8)?,
        error_message: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Reads a bare tag column (`ready`, `csv`, ...) into its serde enum.
fn string_enum<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<T> {
    let tag: String = row.get(index)?;
    serde_json::from_value(Value::String(tag)).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// The tag a serde enum serializes to.
fn tag<T: serde::Serialize>(value: &T) -> rusqlite::Result<String> {
    match serde_json::to_value(value) {
        Ok(Value::String(tag)) => Ok(tag),
        Ok(other) => Ok(other.to_string()),
        Err(e) => Err(rusqlite::Error::ToSqlConversionFailure(Box::new(e))),
    }
}

pub fn insert(conn: &Connection, source: &DataSource) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO data_sources ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ),
        params![
            source.id,
            source.user_id,
            source.organization_id,
            source.name,
            tag(&source.kind)?,
            tag(&source.format)?,
            to_optional_json(source.raw_payload.as_ref())?,
            to_json(&source.metadata)?,
            source.status.as_str(),
            source.error_message,
            source.created_at,
            source.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<DataSource>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM data_sources WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

/// Several sources at once; ids that do not exist are skipped.
pub fn get_many(conn: &Connection, ids: &[String]) -> rusqlite::Result<Vec<DataSource>> {
    let mut sources = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(source) = get(conn, id)? {
            sources.push(source);
        }
    }
    Ok(sources)
}

/// Sources the user owns or can see through an organization. Payloads are
/// left out of listings.
pub fn list_visible(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<DataSource>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM data_sources
         WHERE user_id = ?1
            OR organization_id IN
               (SELECT organization_id FROM organization_members WHERE user_id = ?1)
         ORDER BY created_at DESC, id"
    ))?;
    let rows = stmt.query_map(params![user_id], |row| {
        let mut source = from_row(row)?;
        source.raw_payload = None;
        Ok(source)
    })?;
    rows.collect()
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: DataSourceStatus,
    error_message: Option<&str>,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE data_sources SET status = ?2, error_message = ?3, updated_at = ?4 WHERE id = ?1",
        params![id, status.as_str(), error_message, now()],
    )?;
    Ok(())
}

/// Stores a parsed payload and marks the source ready.
pub fn set_payload(
    conn: &Connection,
    id: &str,
    payload: &Value,
    metadata: &DataSourceMetadata,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE data_sources
         SET raw_payload = ?2, metadata = ?3, status = ?4, error_message = NULL, updated_at = ?5
         WHERE id = ?1",
        params![
            id,
            to_json(payload)?,
            to_json(metadata)?,
            DataSourceStatus::Ready.as_str(),
            now()
        ],
    )?;
    Ok(())
}

pub fn set_metadata(
    conn: &Connection,
    id: &str,
    metadata: &DataSourceMetadata,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE data_sources SET metadata = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, to_json(metadata)?, now()],
    )?;
    Ok(())
}

/// Deletes the source. Widgets keep existing with no source; analyses go.
pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM data_sources WHERE id = ?1", params![id])? > 0)
}
