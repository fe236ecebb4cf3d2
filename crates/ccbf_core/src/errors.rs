use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CcbfError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persist: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("truncated header: got {got} of 16 bytes")]
    TruncatedHeader { got: usize },

    #[error("unrecognized format: magic {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported version {found}")]
    UnsupportedVersion { found: u16 },

    #[error("truncated body: expected {expected} bytes, got {got}")]
    TruncatedBody { expected: u64, got: u64 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CcbfError>;
