use crate::config::AppConfig;
use crate::services::reference::filter;
use actix_web::{web, HttpResponse, Responder};
use common::model::cutting_die::CuttingDieOption;
use log::info;
use rusqlite::{params, Connection};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CuttingDiesQuery {
    printing: Option<String>,
}

/// Actix web handler for `GET /api/reference/cutting-dies`.
///
/// The die catalog lives in the local database, not behind the ERP API.
/// The selected printing option decides which process category of dies is
/// eligible; the parameter is required because there is no sensible
/// unconstrained die list.
pub(crate) async fn process(
    config: web::Data<AppConfig>,
    query: web::Query<CuttingDiesQuery>,
) -> impl Responder {
    let printing = match query.printing.as_deref() {
        Some(p) if !p.trim().is_empty() => p.to_string(),
        _ => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "printing parameter is required" }));
        }
    };

    let category = filter::die_category_for_printing(&printing);
    match query_dies(&config.database_path, category) {
        Ok(dies) => {
            info!(
                "Retrieved {} cutting die options for process category {}",
                dies.len(),
                category
            );
            HttpResponse::Ok().json(serde_json::json!({ "cuttingDieOptions": dies }))
        }
        Err(e) => HttpResponse::ServiceUnavailable()
            .json(serde_json::json!({ "error": format!("Database error: {}", e) })),
    }
}

fn query_dies(database_path: &str, category: i64) -> Result<Vec<CuttingDieOption>, String> {
    let conn = Connection::open(database_path).map_err(|e| e.to_string())?;
    query_dies_on(&conn, category)
}

/// Only web-enabled rows with a real description are eligible. The catalog
/// table genuinely contains the literal 'UNKOWN' as its placeholder
/// description, misspelled.
fn query_dies_on(conn: &Connection, category: i64) -> Result<Vec<CuttingDieOption>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT ref_id, description, radius, label_across, label_around, circumference, web_enabled \
             FROM cutting_dies \
             WHERE process_category = ?1 AND web_enabled = 1 \
               AND description IS NOT NULL AND description <> '' AND description <> 'UNKOWN' \
             ORDER BY description DESC",
        )
        .map_err(|e| e.to_string())?;

    let rows = stmt
        .query_map(params![category], |row| {
            Ok(CuttingDieOption {
                ref_id: row.get(0)?,
                description: row.get(1)?,
                radius: row.get(2)?,
                label_across: row.get(3)?,
                label_around: row.get(4)?,
                circumference: row.get(5)?,
                web_enabled: row.get::<_, i64>(6)? != 0,
            })
        })
        .map_err(|e| e.to_string())?;

    Ok(rows.filter_map(Result::ok).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reference::filter::{PROCESS_DIGITAL, PROCESS_ROTARY};

    fn seeded_catalog() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE cutting_dies (
                ref_id TEXT PRIMARY KEY,
                description TEXT,
                radius REAL NOT NULL DEFAULT 0,
                label_across REAL NOT NULL DEFAULT 0,
                label_around REAL NOT NULL DEFAULT 0,
                circumference REAL NOT NULL DEFAULT 0,
                web_enabled INTEGER NOT NULL DEFAULT 0,
                process_category INTEGER NOT NULL
            );
            INSERT INTO cutting_dies VALUES
                ('D-100', '50 x 30', 1.5, 50, 30, 200, 1, 1),
                ('D-101', '80 x 40', 2.0, 80, 40, 240, 1, 1),
                ('D-102', 'UNKOWN',  0,   0,  0,  0,   1, 1),
                ('D-103', '',        0,   0,  0,  0,   1, 1),
                ('D-104', '60 x 60', 1.0, 60, 60, 220, 0, 1),
                ('D-200', '25 x 25', 0.5, 25, 25, 100, 1, 2);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn filters_to_web_enabled_rows_with_real_descriptions() {
        let conn = seeded_catalog();
        let dies = query_dies_on(&conn, PROCESS_ROTARY).unwrap();
        let refs: Vec<&str> = dies.iter().map(|d| d.ref_id.as_str()).collect();
        // Descending by description: "80 x 40" before "50 x 30"; the
        // placeholder, blank and non-web rows are gone.
        assert_eq!(refs, vec!["D-101", "D-100"]);
    }

    #[test]
    fn category_selects_the_die_family() {
        let conn = seeded_catalog();
        let dies = query_dies_on(&conn, PROCESS_DIGITAL).unwrap();
        assert_eq!(dies.len(), 1);
        assert_eq!(dies[0].ref_id, "D-200");
        assert!(dies[0].web_enabled);
        assert_eq!(dies[0].label_across, 25.0);
    }
}
