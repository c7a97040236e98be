use crate::erp::client::ErpClient;
use crate::erp::error::ErpError;
use crate::services::reference::{filter, normalize, upstream_error_response};
use actix_web::web;
use common::model::reference::ReferenceOption;
use log::info;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct FinishingTypesQuery {
    /// Selected printing option label; constrains which finishes are valid.
    printing: Option<String>,
}

/// Actix web handler for `GET /api/reference/finishing-types`.
///
/// Fetches the upstream finishing types, normalizes them, and restricts the
/// list to what the selected printing option allows. Without a `printing`
/// parameter the full list is returned.
pub(crate) async fn process(
    erp: web::Data<ErpClient>,
    query: web::Query<FinishingTypesQuery>,
) -> impl actix_web::Responder {
    let printing = query.printing.as_deref().unwrap_or_default();
    match fetch_finishing_types(&erp, printing).await {
        Ok(options) => actix_web::HttpResponse::Ok().json(options),
        Err(e) => upstream_error_response(e),
    }
}

async fn fetch_finishing_types(
    erp: &ErpClient,
    printing_text: &str,
) -> Result<Vec<ReferenceOption>, ErpError> {
    let raw = erp.fetch_reference(&erp.config().finishing_types_url).await?;
    let options = normalize::normalize(&raw);
    let total = options.len();
    let filtered = filter::filter_finishes_by_printing(options, printing_text);
    info!(
        "Loaded {} finishing type options, {} valid for printing '{}'",
        total,
        filtered.len(),
        printing_text
    );
    Ok(filtered)
}
