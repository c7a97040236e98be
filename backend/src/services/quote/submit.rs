use crate::services::reference::filter;
use crate::session::state::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::model::quote::QuoteSnapshot;
use common::model::reference::ReferenceOption;
use log::{info, warn};
use regex::Regex;
use uuid::Uuid;

/// Actix web handler for `POST /api/quote/submit`.
///
/// Accepts the flat form snapshot, normalizes and validates it, and parks
/// it in the session store. The returned key identifies the pending quote
/// through the confirmation flow.
pub(crate) async fn process(
    sessions: web::Data<SessionStore>,
    payload: web::Json<QuoteSnapshot>,
) -> impl Responder {
    match stash_snapshot(&sessions, payload.into_inner()).await {
        Ok(key) => HttpResponse::Ok().json(serde_json::json!({ "key": key })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e })),
    }
}

async fn stash_snapshot(
    sessions: &SessionStore,
    mut snapshot: QuoteSnapshot,
) -> Result<String, String> {
    snapshot.name = snapshot.name.trim().to_string();
    snapshot.email = snapshot.email.trim().to_string();
    snapshot.phone = snapshot.phone.trim().to_string();
    validate_contact(&snapshot)?;

    enforce_shape_dimensions(&mut snapshot);
    revalidate_finish(&mut snapshot);
    snapshot.created_timestamp = Some(Utc::now());

    let key = Uuid::new_v4().to_string();
    let value = serde_json::to_value(&snapshot).map_err(|e| e.to_string())?;
    sessions.put(key.clone(), value).await;
    info!("Stored quote snapshot under session key {}", key);
    Ok(key)
}

/// Contact fields are optional, but when present they must look like what
/// they claim to be.
fn validate_contact(snapshot: &QuoteSnapshot) -> Result<(), String> {
    if !snapshot.email.is_empty() {
        let email = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_err(|e| e.to_string())?;
        if !email.is_match(&snapshot.email) {
            return Err("Email address is not valid".to_string());
        }
    }
    if !snapshot.phone.is_empty() {
        let phone = Regex::new(r"^[0-9+()\-\s]{7,20}$").map_err(|e| e.to_string())?;
        if !phone.is_match(&snapshot.phone) {
            return Err("Phone number is not valid".to_string());
        }
    }
    Ok(())
}

/// Exactly one sizing applies: round shapes keep the diameter, everything
/// else keeps width and height. The other fields are cleared so a stale
/// value from a shape change cannot leak into the order payload.
fn enforce_shape_dimensions(snapshot: &mut QuoteSnapshot) {
    if snapshot.is_round() {
        snapshot.label_width.clear();
        snapshot.label_height.clear();
    } else {
        snapshot.diameter.clear();
    }
}

/// The form filters finishes client-side; re-run the structural check here
/// so a stale or tampered selection cannot reach the order payload. An
/// inconsistent finish degrades to "no finish" rather than failing the
/// submission.
fn revalidate_finish(snapshot: &mut QuoteSnapshot) {
    let printing_text = if snapshot.printing.trim().is_empty() {
        &snapshot.printing_value
    } else {
        &snapshot.printing
    };
    let category = match filter::category_for_printing(printing_text) {
        Some(category) => category,
        None => return,
    };

    let selected = ReferenceOption {
        id: snapshot.finish_value.clone(),
        display_text: snapshot.finish.clone(),
    };
    if filter::filter_finishes_by_category(vec![selected], category).is_empty() {
        warn!(
            "Finish '{}' is not valid for printing '{}', dropping the selection",
            snapshot.finish, snapshot.printing
        );
        snapshot.finish.clear();
        snapshot.finish_value.clear();
    }
}
