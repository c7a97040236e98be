use crate::erp::client::ErpClient;
use crate::erp::error::ErpError;
use crate::services::reference::{normalize, upstream_error_response};
use actix_web::web;
use common::model::reference::ReferenceOption;
use log::info;

/// Actix web handler for `GET /api/reference/materials`.
pub(crate) async fn process(erp: web::Data<ErpClient>) -> impl actix_web::Responder {
    match fetch_materials(&erp).await {
        Ok(options) => actix_web::HttpResponse::Ok().json(options),
        Err(e) => upstream_error_response(e),
    }
}

async fn fetch_materials(erp: &ErpClient) -> Result<Vec<ReferenceOption>, ErpError> {
    let raw = erp.fetch_reference(&erp.config().materials_url).await?;
    let options = normalize::normalize(&raw);
    info!("Loaded {} material options", options.len());
    Ok(options)
}
