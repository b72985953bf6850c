use thiserror::Error;

/// Everything that can abort an extraction run. All variants are fatal: the
/// GPX document is only written once fully assembled, so no partial output
/// ever reaches stdout.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no workout found with description {0:?}")]
    RecordNotFound(String),

    #[error("{matches} workouts share the description {description:?}, refusing to pick one")]
    AmbiguousDescription { description: String, matches: usize },

    #[error("workout route decoded to zero points")]
    EmptyRoute,

    #[error("a single coordinate renders to {rendered_len} characters, over the {limit}-character batch limit")]
    OversizedCoordinate { rendered_len: usize, limit: usize },

    #[error("elevation lookup failed: {0}")]
    Lookup(String),

    #[error("elevation lookup failed: {0}")]
    LookupTransport(#[from] reqwest::Error),

    #[error("elevation service returned {got} results for a batch of {expected} coordinates")]
    LookupCountMismatch { expected: usize, got: usize },

    #[error("failed to decode workout polyline: {0}")]
    Polyline(String),

    #[error("workout start time is out of range: {0}")]
    Timestamp(#[from] time::error::ComponentRange),

    #[error("failed to format timestamp: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("failed to write GPX document: {0}")]
    Serialization(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}
