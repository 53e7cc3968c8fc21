//! Error types for credential assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling transport credentials.
#[derive(Debug, Error)]
pub enum CredsError {
    /// Credential material could not be read from disk. Built-in
    /// resolution treats this as fatal: the default test material is a
    /// precondition, and a broken user-supplied path is a misconfigured
    /// run, not a transient condition.
    #[error("failed to read credential material from {}: {}", .path.display(), .source)]
    Material {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid PEM material: {0}")]
    InvalidPem(String),

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    #[error("identity credential error: {0}")]
    Identity(#[from] tessera_identity::IdentityError),

    /// The QUIC layer mandates TLS; insecure credentials cannot feed it.
    #[error("insecure credentials cannot configure a QUIC endpoint")]
    InsecureTransport,
}

/// Result type alias using [`CredsError`].
pub type Result<T> = std::result::Result<T, CredsError>;
