//! TLS configuration builders for the identity-authenticated transport.
//!
//! Constructs `rustls::ServerConfig` and `rustls::ClientConfig` with the
//! identity-pinning verifiers from [`crate::verifier`].
//!
//! Both builders enforce:
//! - TLS 1.3 only (required by the QUIC layer the configs feed)
//! - ring crypto provider
//! - mutual authentication with self-signed Ed25519 certificates

use std::sync::Arc;

use rustls::client::danger::ServerCertVerifier;
use rustls::server::danger::ClientCertVerifier;
use rustls_pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

use crate::authorization::PeerAuthorization;
use crate::error::{IdentityError, Result};
use crate::identity::Identity;
use crate::verifier::{IdentityClientCertVerifier, IdentityServerCertVerifier};

/// ALPN protocol identifier spoken over Tessera transports.
pub const ALPN_TESSERA: &[u8] = b"tessera";

/// Build a `rustls::ServerConfig` for the accepting side.
///
/// The config requires client certificates (mutual authentication) and
/// verifies them against `authz`.
pub fn server_tls_config(
    identity: &Identity,
    authz: PeerAuthorization,
) -> Result<rustls::ServerConfig> {
    let verifier: Arc<dyn ClientCertVerifier> = Arc::new(IdentityClientCertVerifier::new(authz));

    let cert_chain = vec![CertificateDer::from(identity.certificate().der().to_vec())];
    let private_key = private_key_der(identity)?;

    let mut config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(&[&rustls::version::TLS13])
    .map_err(|e| IdentityError::TlsConfiguration(format!("TLS version config: {e}")))?
    .with_client_cert_verifier(verifier)
    .with_single_cert(cert_chain, private_key)
    .map_err(|e| IdentityError::TlsConfiguration(format!("server cert config: {e}")))?;

    // The QUIC layer requires ALPN.
    config.alpn_protocols = vec![ALPN_TESSERA.to_vec()];

    Ok(config)
}

/// Build a `rustls::ClientConfig` for the connecting side.
///
/// The config presents the identity's certificate and verifies the
/// accepting peer against `authz`.
pub fn client_tls_config(
    identity: &Identity,
    authz: PeerAuthorization,
) -> Result<rustls::ClientConfig> {
    let verifier: Arc<dyn ServerCertVerifier> = Arc::new(IdentityServerCertVerifier::new(authz));

    let cert_chain = vec![CertificateDer::from(identity.certificate().der().to_vec())];
    let private_key = private_key_der(identity)?;

    let mut config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(&[&rustls::version::TLS13])
    .map_err(|e| IdentityError::TlsConfiguration(format!("TLS version config: {e}")))?
    .dangerous()
    .with_custom_certificate_verifier(verifier)
    .with_client_auth_cert(cert_chain, private_key)
    .map_err(|e| IdentityError::TlsConfiguration(format!("client cert config: {e}")))?;

    // The QUIC layer requires ALPN.
    config.alpn_protocols = vec![ALPN_TESSERA.to_vec()];

    Ok(config)
}

/// Export an identity's private key as a rustls `PrivateKeyDer`.
fn private_key_der(identity: &Identity) -> Result<PrivateKeyDer<'static>> {
    let pkcs8_bytes = identity.keypair().to_pkcs8_der()?;
    let pkcs8 = PrivatePkcs8KeyDer::from(pkcs8_bytes);
    Ok(PrivateKeyDer::Pkcs8(pkcs8))
}
