use crate::db::now;
use common::model::organization::{MemberRole, Organization, OrganizationMember};
use rusqlite::{params, Connection, OptionalExtension};

/// Creates the organization and makes its creator the owner.
pub fn insert(conn: &mut Connection, organization: &Organization) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO organizations (id, name, owner_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            organization.id,
            organization.name,
            organization.owner_id,
            organization.created_at
        ],
    )?;
    tx.execute(
        "INSERT INTO organization_members (organization_id, user_id, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            organization.id,
            organization.owner_id,
            MemberRole::Owner.as_str(),
            organization.created_at
        ],
    )?;
    tx.commit()
}

pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<Organization>> {
    conn.query_row(
        "SELECT id, name, owner_id, created_at FROM organizations WHERE id = ?1",
        params![id],
        |row| {
            Ok(Organization {
                id: row.get(0)?,
                name: row.get(1)?,
                owner_id: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Organizations the user belongs to, in creation order.
pub fn list_for_user(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Organization>> {
    let mut stmt = conn.prepare(
        "SELECT o.id, o.name, o.owner_id, o.created_at
         FROM organizations o
         JOIN organization_members m ON m.organization_id = o.id
         WHERE m.user_id = ?1
         ORDER BY o.created_at, o.id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(Organization {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect()
}

/// Adds a member, or changes the role of an existing one.
pub fn upsert_member(conn: &Connection, member: &OrganizationMember) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO organization_members (organization_id, user_id, role, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (organization_id, user_id) DO UPDATE SET role = excluded.role",
        params![
            member.organization_id,
            member.user_id,
            member.role.as_str(),
            now()
        ],
    )?;
    Ok(())
}

/// The user's role in the organization, if a member.
pub fn role_of(
    conn: &Connection,
    organization_id: &str,
    user_id: &str,
) -> rusqlite::Result<Option<MemberRole>> {
    let role: Option<String> = conn
        .query_row(
            "SELECT role FROM organization_members WHERE organization_id = ?1 AND user_id = ?2",
            params![organization_id, user_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(role.as_deref().and_then(MemberRole::parse))
}
