use thiserror::Error;

/// Errors raised at the edges of the crate: decoding feeds, building an
/// evaluator, and turning UI input into a query. Parsing and evaluating a
/// regulation never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown evaluation mode '{0}', expected 'point' or 'interval'")]
    UnknownMode(String),

    #[error("interval query requires an end instant")]
    MissingEnd,

    #[error("invalid classification pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("malformed regulation feed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
