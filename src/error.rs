use thiserror::Error;

#[derive(Debug, Error)]
pub enum RqliteDbError {
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Remote SQL error: {0}")]
    RemoteSqlError(String),

    #[error("The database result is not currently set")]
    ResultUnset,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Other database error: {0}")]
    Other(String),
}
