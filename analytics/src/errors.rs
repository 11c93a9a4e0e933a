use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The aggregation engine was invoked on an empty reading set. Callers
    /// must check emptiness first, so hitting this is a logic bug rather
    /// than a user-facing condition.
    #[error("cannot summarize an empty reading set")]
    EmptyInput,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
