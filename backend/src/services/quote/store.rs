use chrono::Utc;
use common::model::quote::QuoteSnapshot;
use log::info;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Persists the snapshot and returns the generated quote identifier.
/// A later submission failure never rolls this back.
pub fn store_quote(database_path: &str, snapshot: &QuoteSnapshot) -> Result<String, String> {
    let conn = Connection::open(database_path).map_err(|e| e.to_string())?;
    insert_quote(&conn, snapshot)
}

fn insert_quote(conn: &Connection, snapshot: &QuoteSnapshot) -> Result<String, String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS quotes (
            id TEXT PRIMARY KEY,
            name TEXT,
            email TEXT,
            phone TEXT,
            snapshot TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    let quote_id = Uuid::new_v4().to_string();
    let snapshot_json = serde_json::to_string(snapshot).map_err(|e| e.to_string())?;
    let created_at = snapshot
        .created_timestamp
        .unwrap_or_else(Utc::now)
        .to_rfc3339();

    conn.execute(
        "INSERT INTO quotes (id, name, email, phone, snapshot, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            quote_id,
            snapshot.name,
            snapshot.email,
            snapshot.phone,
            snapshot_json,
            created_at
        ],
    )
    .map_err(|e| e.to_string())?;

    info!("Quote stored with id {}", quote_id);
    Ok(quote_id)
}
