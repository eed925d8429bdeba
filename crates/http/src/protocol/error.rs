use std::collections::TryReserveError;
use thiserror::Error;

/// Arena growth failure.
///
/// Always recoverable: the operation that requested the growth is aborted and
/// the message is left in its last valid state.
#[derive(Error, Debug)]
#[error("failed to reserve {additional} additional arena bytes")]
pub struct AllocError {
    additional: usize,
    #[source]
    source: TryReserveError,
}

impl AllocError {
    pub(crate) fn new(additional: usize, source: TryReserveError) -> Self {
        Self { additional, source }
    }

    /// The number of additional bytes the rejected reservation asked for.
    pub fn additional(&self) -> usize {
        self.additional
    }
}

/// Message construction failure.
///
/// No partial message is ever returned: a constructor either yields a complete
/// message or one of these.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("allocation failed: {source}")]
    Alloc {
        #[from]
        source: AllocError,
    },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl BuildError {
    pub(crate) fn invalid_argument<S: ToString>(reason: S) -> Self {
        Self::InvalidArgument { reason: reason.to_string() }
    }
}

/// Wire-format parsing failure.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input bytes lack a required structural delimiter (space, CRLF,
    /// CRLF-CRLF). The attempted parse is abandoned as a whole.
    #[error("malformed request frame: {reason}")]
    Malformed { reason: String },

    #[error("allocation failed: {source}")]
    Alloc {
        #[from]
        source: AllocError,
    },
}

impl ParseError {
    pub(crate) fn malformed<S: ToString>(reason: S) -> Self {
        Self::Malformed { reason: reason.to_string() }
    }
}

/// Chunk segment decoding failure.
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("malformed chunk segment: {reason}")]
    Malformed { reason: String },
}

impl ChunkError {
    pub(crate) fn malformed<S: ToString>(reason: S) -> Self {
        Self::Malformed { reason: reason.to_string() }
    }
}
