//! Ed25519 keypair generation and management.
//!
//! All cryptographic operations are delegated to `ed25519-dalek`; this
//! module is a thin wrapper exposing the interface the rest of the crate
//! needs.

use ed25519_dalek::{SigningKey, VerifyingKey, pkcs8::EncodePrivateKey};
use rand::rngs::OsRng;

use crate::error::{IdentityError, Result};

/// An Ed25519 keypair identifying one side of a mutually-authenticated
/// connection.
///
/// The signing key (private) stays in memory for the lifetime of the
/// credential and is zeroized on drop. The verifying key (public) is
/// embedded in the self-signed X.509 certificate presented during the
/// handshake; it is the key, not the certificate, that peers authenticate.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random Ed25519 keypair using the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Reconstruct a keypair from a 32-byte secret key.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(bytes),
        }
    }

    /// Returns the 32-byte secret key.
    ///
    /// **Security:** the caller is responsible for storing this securely.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Returns the Ed25519 verifying (public) key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Returns the raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Returns the PKCS#8 DER encoding of the keypair (RFC 8410).
    ///
    /// This is the format `rcgen` requires for certificate generation and
    /// rustls requires for the private-key half of a TLS config.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let doc = self
            .signing_key
            .to_pkcs8_der()
            .map_err(|e| IdentityError::KeyEncoding(e.to_string()))?;
        Ok(doc.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = Keypair::generate();
        assert_eq!(kp.public_key_bytes().len(), 32);
        assert_eq!(kp.secret_bytes().len(), 32);
    }

    #[test]
    fn secret_bytes_roundtrip() {
        let kp1 = Keypair::generate();
        let secret = kp1.secret_bytes();
        let kp2 = Keypair::from_secret_bytes(&secret);
        assert_eq!(kp1.public_key_bytes(), kp2.public_key_bytes());
    }

    #[test]
    fn pkcs8_der_is_nonempty() {
        let kp = Keypair::generate();
        let der = kp.to_pkcs8_der().expect("PKCS#8 export should succeed");
        assert!(!der.is_empty());
    }

    #[test]
    fn different_keypairs_differ() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        assert_ne!(kp1.public_key_bytes(), kp2.public_key_bytes());
    }
}
