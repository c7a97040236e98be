use serde::Deserialize;

#[derive(Deserialize)]
/// Request payload for the quote confirmation endpoint.
/// Contains the session key returned by the submit endpoint.
pub struct ConfirmQuoteRequest {
    pub key: String,
}
