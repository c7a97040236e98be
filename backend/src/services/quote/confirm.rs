//! # Quote Confirmation Service
//!
//! The orchestrator behind `POST /api/quote/confirm`. A confirmed
//! submission runs three steps in order:
//!
//! 1.  **Consume** the pending snapshot from the session store (one confirm
//!     per submitted form; a second confirm finds nothing).
//! 2.  **Persist** the snapshot in the quotes table and obtain the quote
//!     identifier.
//! 3.  **Transform** the snapshot into the ERP order payload and submit it.
//!
//! The outcome reports the quote id and the submission flag together.
//! Persistence is never rolled back by a submission failure: a stored quote
//! with a failed submission is still a quote the sales team can follow up
//! on.

use crate::config::AppConfig;
use crate::erp::client::ErpClient;
use crate::services::quote::{store, transform};
use crate::session::state::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::model::quote::{QuoteOutcome, QuoteSnapshot};
use common::requests::ConfirmQuoteRequest;
use log::{error, info};

pub(crate) async fn process(
    sessions: web::Data<SessionStore>,
    erp: web::Data<ErpClient>,
    config: web::Data<AppConfig>,
    payload: web::Json<ConfirmQuoteRequest>,
) -> impl Responder {
    let snapshot = match sessions.take(&payload.key).await {
        Some(value) => match serde_json::from_value::<QuoteSnapshot>(value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Stored quote snapshot is unreadable: {}", e);
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Stored quote snapshot is unreadable" }));
            }
        },
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "No pending quote for this key" }));
        }
    };

    match confirm_quote(&erp, &config, snapshot).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({ "error": e })),
    }
}

async fn confirm_quote(
    erp: &ErpClient,
    config: &AppConfig,
    snapshot: QuoteSnapshot,
) -> Result<QuoteOutcome, String> {
    let quote_id = store::store_quote(&config.database_path, &snapshot)?;

    let payload = transform::build_order_payload(&snapshot, &config.customer_id, &config.contact_id);
    let submission_succeeded = erp.submit_order(&payload).await;

    if submission_succeeded {
        info!("Quote {} submitted to the ERP", quote_id);
    } else {
        error!("Quote {} stored, but the ERP submission failed", quote_id);
    }

    Ok(QuoteOutcome {
        quote_id,
        submission_succeeded,
    })
}
