use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx HTTP response.
    #[error("Graph HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Error object in the response body. Codes can be six digits (131056).
    #[error("Graph API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}
