use thiserror::Error;

/// Errors raised by the core data model: file-format I/O and invariant checks that are
/// cheap enough to check at runtime rather than prove statically.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed {what} file: {detail}")]
    MalformedFile { what: &'static str, detail: String },

    #[error("invariant violated: {0}")]
    Invariant(String),
}
