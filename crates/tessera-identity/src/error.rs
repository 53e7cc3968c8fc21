//! Error types for identity-transport primitives.

use thiserror::Error;

/// Errors that can occur within the `tessera-identity` crate.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to encode Ed25519 key: {0}")]
    KeyEncoding(String),

    #[error("failed to generate X.509 certificate: {0}")]
    CertificateGeneration(String),

    #[error("peer certificate rejected: {0}")]
    CertificateVerification(String),

    #[error("TLS configuration error: {0}")]
    TlsConfiguration(String),
}

/// Result type alias using [`IdentityError`].
pub type Result<T> = std::result::Result<T, IdentityError>;
