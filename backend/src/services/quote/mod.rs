//! Quote intake, confirmation and submission.
//!
//! The flow spans two page loads. `POST /submit` validates the flat form
//! snapshot and parks it in the session store under a fresh key;
//! `GET /saved/{key}` returns it for the confirmation page (re-armed, so an
//! edit round-trip still finds it); `POST /confirm` consumes it, persists
//! the quote, transforms it into the ERP's order payload and submits it.

mod confirm;
mod saved;
mod submit;

pub mod store;
pub mod transform;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/quote";

/// Configures and returns the Actix scope for the quote routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/submit", post().to(submit::process))
        .route("/saved/{key}", get().to(saved::process))
        .route("/confirm", post().to(confirm::process))
}
