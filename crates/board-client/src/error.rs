#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    /// Input refused before sending; carries the offending text.
    #[error("input rejected: {0}")]
    Rejected(String),
}
