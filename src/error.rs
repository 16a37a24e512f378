use thiserror::Error;

/// Everything that can abort a pipeline run. No variant is retried or
/// salvaged by the core; callers decide what to surface to an operator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("key column `{0}` not found")]
    KeyNotFound(String),

    #[error("key value `{0}` has no entry in the aggregate lookup")]
    KeyMismatch(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Network(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
