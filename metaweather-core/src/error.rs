use thiserror::Error;

/// Failures a query operation can surface. There is no local recovery:
/// both kinds propagate to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed: connection refused, DNS failure,
    /// timeout, or an unreadable response body.
    #[error("request to weather service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON, or did not match the
    /// expected record shape.
    #[error("failed to decode weather service response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
