use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("An unredaction request is already in flight for this document")]
    UnredactionInFlight,

    #[error("No unredaction request is in flight for revision {0}")]
    NoUnredactionInFlight(u64),

    #[error("Document changed while the request was in flight (snapshot revision {snapshot}, now {current})")]
    DocumentChanged { snapshot: u64, current: u64 },

    #[error("Word index {index} out of range (document has {len} words)")]
    WordIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
