use thiserror::Error;

/// Errors surfaced by the consent widget.
///
/// Extraction never fails: a label without letters simply yields an empty key.
/// Store and style failures are propagated to the host untouched.
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("consent store error: {0}")]
    Store(String),

    #[error("stored consent record is not valid JSON: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("style injection error: {0}")]
    Style(String),

    #[error("no theme bus injected or registered")]
    NoThemeBus,

    #[error("duplicate category key: {0:?}")]
    DuplicateKey(String),
}

pub type ConsentResult<T> = Result<T, ConsentError>;
