//! Self-signed X.509 certificates wrapping Ed25519 identity keys.
//!
//! Peers on the identity-authenticated transport present self-signed
//! certificates; verification pins the embedded key, never a CA chain, so
//! the certificate is pure presentation format. Generation is delegated to
//! `rcgen`.

use rcgen::{CertificateParams, KeyPair as RcgenKeyPair, PKCS_ED25519};
use rustls_pki_types::PrivatePkcs8KeyDer;
use time::OffsetDateTime;

use crate::error::{IdentityError, Result};
use crate::keypair::Keypair;

/// Certificate validity duration in days.
///
/// Identities built by this crate are ephemeral (per-process); the window
/// only has to comfortably outlive the process.
const VALIDITY_DAYS: i64 = 30;

/// A self-signed X.509 certificate wrapping an Ed25519 identity key.
pub struct Certificate {
    /// DER-encoded certificate bytes.
    cert_der: Vec<u8>,
    /// PEM-encoded certificate string.
    cert_pem: String,
}

impl Certificate {
    /// Generate a self-signed certificate for `keypair`, valid for 30 days
    /// starting at `now_epoch_secs` (seconds since Unix epoch).
    pub fn generate(keypair: &Keypair, now_epoch_secs: i64) -> Result<Self> {
        // rcgen needs the identity key in PKCS#8 DER form.
        let pkcs8_der = keypair.to_pkcs8_der()?;
        let pkcs8_typed = PrivatePkcs8KeyDer::from(pkcs8_der);
        let rcgen_keypair = RcgenKeyPair::from_pkcs8_der_and_sign_algo(&pkcs8_typed, &PKCS_ED25519)
            .map_err(|e| IdentityError::CertificateGeneration(e.to_string()))?;

        let not_before = OffsetDateTime::from_unix_timestamp(now_epoch_secs)
            .map_err(|e| IdentityError::CertificateGeneration(format!("invalid not_before: {e}")))?;
        let not_after = OffsetDateTime::from_unix_timestamp(
            now_epoch_secs + VALIDITY_DAYS * 86400,
        )
        .map_err(|e| IdentityError::CertificateGeneration(format!("invalid not_after: {e}")))?;

        // No subject alt names: verification never matches a hostname.
        let mut params = CertificateParams::new(vec![])
            .map_err(|e| IdentityError::CertificateGeneration(format!("invalid cert params: {e}")))?;
        params.not_before = not_before;
        params.not_after = not_after;

        let cert = params
            .self_signed(&rcgen_keypair)
            .map_err(|e| IdentityError::CertificateGeneration(e.to_string()))?;

        Ok(Self {
            cert_der: cert.der().to_vec(),
            cert_pem: cert.pem(),
        })
    }

    /// Returns the DER-encoded certificate bytes.
    pub fn der(&self) -> &[u8] {
        &self.cert_der
    }

    /// Returns the PEM-encoded certificate string.
    pub fn pem(&self) -> &str {
        &self.cert_pem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference epoch: 2025-01-01 00:00:00 UTC.
    const JAN_1_2025: i64 = 1735689600;

    #[test]
    fn generate_produces_nonempty_der() {
        let kp = Keypair::generate();
        let cert = Certificate::generate(&kp, JAN_1_2025).expect("cert generation should succeed");
        assert!(!cert.der().is_empty());
    }

    #[test]
    fn generate_produces_valid_pem() {
        let kp = Keypair::generate();
        let cert = Certificate::generate(&kp, JAN_1_2025).expect("cert generation should succeed");
        assert!(cert.pem().starts_with("-----BEGIN CERTIFICATE-----"));
    }

    #[test]
    fn same_keypair_produces_valid_cert_twice() {
        let kp = Keypair::generate();
        let cert1 =
            Certificate::generate(&kp, JAN_1_2025).expect("first cert generation should succeed");
        let cert2 = Certificate::generate(&kp, JAN_1_2025 + 1)
            .expect("second cert generation should succeed");
        assert!(!cert1.der().is_empty());
        assert!(!cert2.der().is_empty());
    }
}
