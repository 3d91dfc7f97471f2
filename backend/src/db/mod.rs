//! SQLite persistence.
//!
//! Every request opens its own connection through [`Database::connect`];
//! SQLite serializes writers itself and a connection is cheap next to an
//! HTTP round trip. JSON-valued fields are stored as TEXT and decoded with
//! `serde_json` when rows are read.

pub mod analyses;
pub mod dashboards;
pub mod data_sources;
pub mod organizations;
pub mod schema;
pub mod widgets;

use rusqlite::types::Type;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Location of the database file, shared as `web::Data`.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Opens the file, creating the schema when missing.
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        let database = Database {
            path: path.as_ref().to_path_buf(),
        };
        schema::init(&database.connect()?)?;
        Ok(database)
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }
}

/// Current time as stored in `created_at`/`updated_at`.
pub fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Decodes a JSON TEXT column inside a row mapper.
pub(crate) fn json_column<T: DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<T> {
    let text: String = row.get(index)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Like [`json_column`] for nullable columns.
pub(crate) fn optional_json_column<T: DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<Option<T>> {
    let text: Option<String> = row.get(index)?;
    text.map(|text| {
        serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
    })
    .transpose()
}

/// Encodes a value for a JSON TEXT column.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> rusqlite::Result<String> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Like [`to_json`]; `None` stays SQL NULL.
pub(crate) fn to_optional_json<T: serde::Serialize>(
    value: Option<&T>,
) -> rusqlite::Result<Option<String>> {
    value.map(to_json).transpose()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Database;
    use tempfile::TempDir;

    /// A database in a temporary directory, removed on drop.
    pub struct TestDatabase {
        pub database: Database,
        _dir: TempDir,
    }

    pub fn temp_database() -> TestDatabase {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = Database::open(dir.path().join("test.sqlite")).expect("open database");
        TestDatabase {
            database,
            _dir: dir,
        }
    }
}
