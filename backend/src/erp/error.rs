use thiserror::Error;

/// Failure conditions at the ERP boundary. Handlers convert these into a
/// per-section error state; they never take down the whole page.
#[derive(Debug, Error)]
pub enum ErpError {
    /// All credential-presentation strategies were exhausted. The message
    /// aggregates every attempt, labeled by strategy.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Network failure, timeout, or a non-success upstream status.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream body could not be parsed as JSON at all.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}
