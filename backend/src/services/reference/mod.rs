//! Reference-data proxy endpoints.
//!
//! Each endpoint fetches one upstream resource, runs it through the
//! normalizer, and returns a uniform option list the form can render
//! directly. A failed lookup produces an error state for that section only;
//! the rest of the page keeps working.
//!
//! The provided routes are:
//! - `GET /api/reference/color-codes`: colour codes (the printing process
//!   choices), with the upstream Blocked/AllowRFQ record filter applied.
//! - `GET /api/reference/finishing-types?printing=...`: finishing types,
//!   restricted to the ones valid for the selected printing option.
//! - `GET /api/reference/materials`: substrate materials, unfiltered.
//! - `GET /api/reference/cutting-dies?printing=...`: die catalog rows from
//!   the local database, keyed by the process category the printing text
//!   implies. `printing` is required here.

mod color_codes;
mod cutting_dies;
mod finishing_types;
mod materials;

pub mod filter;
pub mod normalize;

use crate::erp::error::ErpError;
use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Scope};

const API_PATH: &str = "/api/reference";

/// Configures and returns the Actix scope for the reference-data routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/color-codes", get().to(color_codes::process))
        .route("/finishing-types", get().to(finishing_types::process))
        .route("/materials", get().to(materials::process))
        .route("/cutting-dies", get().to(cutting_dies::process))
}

/// Maps an ERP boundary failure onto the section-level error response the
/// page scripts expect.
pub(crate) fn upstream_error_response(err: ErpError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        ErpError::AuthenticationFailed(_) => HttpResponse::Unauthorized().json(body),
        ErpError::UpstreamUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        ErpError::MalformedResponse(_) => HttpResponse::BadGateway().json(body),
    }
}
