use crate::session::state::SessionStore;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/quote/saved/{key}`.
///
/// Returns the pending snapshot for the confirmation page. The entry is
/// re-armed on every read so it also survives the edit round-trip back to
/// the form; only a confirm consumes it.
pub(crate) async fn process(
    key: web::Path<String>,
    sessions: web::Data<SessionStore>,
) -> impl Responder {
    match sessions.peek_and_rearm(&key).await {
        Some(snapshot) => HttpResponse::Ok().json(snapshot),
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "No saved quote for this key" })),
    }
}
