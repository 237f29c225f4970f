use reqwest::header::InvalidHeaderValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} cannot be empty")]
    EmptyIdentifier(&'static str),

    #[error("API token is not a valid header value: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-200 response carrying the API's `{"code", "message"}` envelope.
    #[error("{message}")]
    Api { code: i64, message: String },

    #[error("unknown error, status code: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
