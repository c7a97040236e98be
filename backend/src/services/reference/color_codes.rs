use crate::erp::client::ErpClient;
use crate::erp::error::ErpError;
use crate::services::reference::{normalize, upstream_error_response};
use actix_web::web;
use common::model::reference::ReferenceOption;
use log::info;

/// Actix web handler for `GET /api/reference/color-codes`.
///
/// Proxies the ERP's colour-code resource and returns the normalized option
/// list the printing selector renders.
pub(crate) async fn process(erp: web::Data<ErpClient>) -> impl actix_web::Responder {
    match fetch_color_codes(&erp).await {
        Ok(options) => actix_web::HttpResponse::Ok().json(options),
        Err(e) => upstream_error_response(e),
    }
}

async fn fetch_color_codes(erp: &ErpClient) -> Result<Vec<ReferenceOption>, ErpError> {
    let raw = erp.fetch_reference(&erp.config().color_codes_url).await?;
    let options = normalize::normalize_color_codes(&raw);
    info!("Loaded {} colour code options", options.len());
    Ok(options)
}
