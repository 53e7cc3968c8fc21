//! Peer fingerprints derived from Ed25519 public keys.
//!
//! A [`PeerId`] is the SHA-256 hash of a peer's raw 32-byte public key.
//! Authorization decisions compare full hashes; the hex form exists for log
//! lines and allow-list configuration.
//!
//! During a handshake the peer's key arrives inside a self-signed X.509
//! certificate, so this module also knows how to pull the key out of a
//! DER-encoded certificate (`x509-parser` does the ASN.1 work).

use sha2::{Digest, Sha256};
use x509_parser::prelude::*;

use crate::error::{IdentityError, Result};

/// Ed25519 OID: 1.3.101.112.
const ED25519_OID: &[u64] = &[1, 3, 101, 112];

/// Fingerprint of a peer's Ed25519 public key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PeerId {
    hash: [u8; 32],
}

impl PeerId {
    /// Derive a PeerId from a raw Ed25519 public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let hash: [u8; 32] = Sha256::digest(public_key).into();
        Self { hash }
    }

    /// Derive a PeerId from the Ed25519 key embedded in a DER-encoded
    /// X.509 certificate.
    ///
    /// Fails if the certificate cannot be parsed, its key algorithm is not
    /// Ed25519, or the key is not exactly 32 bytes.
    pub fn from_certificate(cert_der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(cert_der)
            .map_err(|e| IdentityError::CertificateVerification(format!("X.509 parse: {e}")))?;

        let spki = cert.public_key();

        let ed25519 = oid_registry::Oid::from(ED25519_OID).expect("Ed25519 OID constant is valid");
        if spki.algorithm.algorithm != ed25519 {
            return Err(IdentityError::CertificateVerification(format!(
                "expected Ed25519 key algorithm (1.3.101.112), got {}",
                spki.algorithm.algorithm
            )));
        }

        // For Ed25519 the SubjectPublicKeyInfo bit string holds the raw
        // 32-byte key with no further ASN.1 wrapping.
        let raw_key = spki.subject_public_key.as_ref();
        let key: [u8; 32] = raw_key.try_into().map_err(|_| {
            IdentityError::CertificateVerification(format!(
                "expected 32-byte Ed25519 public key, got {} bytes",
                raw_key.len()
            ))
        })?;

        Ok(Self::from_public_key(&key))
    }

    /// Construct a PeerId from a raw 32-byte hash (for allow-list entries
    /// loaded from configuration).
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// Returns the full 32-byte hash for exact comparison.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full lowercase hex form.
    pub fn to_hex(&self) -> String {
        self.hash.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First 8 hex characters, for log lines.
    pub fn short_hex(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PeerId({}…)", self.short_hex())
    }
}
