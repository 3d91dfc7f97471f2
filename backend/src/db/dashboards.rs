use crate::db::{json_column, to_json};
use common::model::dashboard::Dashboard;
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, user_id, organization_id, title, description, is_public, share_token, \
                       preferences, created_at, updated_at";

fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dashboard> {
    Ok(Dashboard {
        id: row.get(0)?,
        user_id: row.get(1)?,
        organization_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        is_public: row.get(5)?,
        share_token: row.get(6)?,
        preferences: json_column(row, 7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

pub fn insert(conn: &Connection, dashboard: &Dashboard) -> rusqlite::Result<()> {
    conn.execute(
        &format!("INSERT INTO dashboards ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
        params![
            dashboard.id,
            dashboard.user_id,
            dashboard.organization_id,
            dashboard.title,
            dashboard.description,
            dashboard.is_public,
            dashboard.share_token,
            to_json(&dashboard.preferences)?,
            dashboard.created_at,
            dashboard.updated_at,
        ],
    )?;
    Ok(())
}

/// Writes every mutable field back.
pub fn update(conn: &Connection, dashboard: &Dashboard) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE dashboards
         SET title = ?2, description = ?3, is_public = ?4, share_token = ?5,
             preferences = ?6, updated_at = ?7
         WHERE id = ?1",
        params![
            dashboard.id,
            dashboard.title,
            dashboard.description,
            dashboard.is_public,
            dashboard.share_token,
            to_json(&dashboard.preferences)?,
            dashboard.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<Dashboard>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM dashboards WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

/// A public dashboard by share token. Private dashboards never match.
pub fn get_public(conn: &Connection, share_token: &str) -> rusqlite::Result<Option<Dashboard>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM dashboards WHERE share_token = ?1 AND is_public = 1"),
        params![share_token],
        from_row,
    )
    .optional()
}

/// Dashboards the user owns or can see through an organization.
pub fn list_visible(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Dashboard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM dashboards
         WHERE user_id = ?1
            OR organization_id IN
               (SELECT organization_id FROM organization_members WHERE user_id = ?1)
         ORDER BY updated_at DESC, id"
    ))?;
    let rows = stmt.query_map(params![user_id], from_row)?;
    rows.collect()
}

/// Deletes the dashboard; its widgets go with it.
pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM dashboards WHERE id = ?1", params![id])? > 0)
}
