//! Client for the external manufacturing ERP.
//!
//! Two capabilities live here: fetching raw reference-data payloads
//! (`client::ErpClient::fetch_reference`) and submitting a finished order
//! payload (`client::ErpClient::submit_order`). Both authenticate through
//! the multi-strategy OAuth fallback in `auth`.

pub mod auth;
pub mod client;
pub mod error;
