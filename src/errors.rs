// errors.rs
use thiserror::Error;

use crate::graph::GraphError;

/// Errors originating from the monitoring run itself
/// (config, storage, export) or from the Graph API layer.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Graph API error: {0}")]
    GraphApi(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("Database error: {0}")]
    Db(String),

    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GraphError> for MonitorError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Network(msg) => MonitorError::Network(msg),
            GraphError::Http { status, body } => {
                MonitorError::GraphApi(format!("HTTP {status}: {body}"))
            }
            GraphError::Api { code, message } => {
                MonitorError::GraphApi(format!("code {code}: {message}"))
            }
            GraphError::JsonParse(msg) => MonitorError::JsonParse(msg),
            GraphError::UnexpectedShape(msg) => MonitorError::UnexpectedShape(msg),
        }
    }
}

impl From<rusqlite::Error> for MonitorError {
    fn from(err: rusqlite::Error) -> Self {
        MonitorError::Db(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for MonitorError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        MonitorError::Xlsx(err.to_string())
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;
