//! Error types for the CDDB client.
//!
//! Protocol status codes are not errors: any status the library does not
//! handle explicitly is returned as a structured value and left to the
//! caller to interpret. Errors here cover the two things that can actually
//! go wrong on our side of the wire: the HTTP round trip failing, and a
//! response (or input TOC) that does not follow the expected format.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the CDDB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure during the HTTP round trip. Propagated unmodified,
    /// never retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server response does not follow the CDDB wire format (unparseable
    /// status line, truncated exact-match body, malformed match line).
    #[error("malformed server response: {0}")]
    Protocol(String),

    /// A raw TOC string could not be interpreted.
    #[error("malformed TOC: {0}")]
    MalformedToc(String),

    /// Fingerprint fields are inconsistent: the TOC must hold one offset
    /// per track plus the total disc length in seconds.
    #[error("invalid disc fingerprint: expected {expected} TOC entries, got {actual}")]
    InvalidFingerprint { expected: usize, actual: usize },
}

impl Error {
    /// Create a protocol format error.
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a malformed TOC error.
    pub(crate) fn toc(message: impl Into<String>) -> Self {
        Self::MalformedToc(message.into())
    }
}
