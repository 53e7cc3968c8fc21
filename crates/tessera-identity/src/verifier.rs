//! Custom rustls verifiers that authenticate peers by key identity.
//!
//! [`IdentityServerCertVerifier`] (used by the connecting side) and
//! [`IdentityClientCertVerifier`] (used by the accepting side) derive the
//! peer's [`PeerId`] from the presented leaf certificate and consult a
//! [`PeerAuthorization`] policy. Handshake signature verification is
//! delegated to the rustls ring crypto provider; only certificate chain
//! validation is replaced, since there is no chain to validate.

use std::sync::LazyLock;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::server::danger::{ClientCertVerified, ClientCertVerifier};
use rustls::{DigitallySignedStruct, Error as TlsError, SignatureScheme};
use rustls_pki_types::{CertificateDer, ServerName, UnixTime};

use crate::authorization::PeerAuthorization;
use crate::peer_id::PeerId;

/// Check a presented leaf certificate against the authorization policy.
///
/// Shared by both verifier directions. Returns `Ok(())` when the peer is
/// accepted, a `TlsError` surfaced into the handshake otherwise.
fn authorize_peer(
    end_entity: &CertificateDer<'_>,
    authz: &PeerAuthorization,
) -> Result<(), TlsError> {
    let peer = PeerId::from_certificate(end_entity)
        .map_err(|e| TlsError::General(e.to_string()))?;

    if !authz.permits(&peer) {
        return Err(TlsError::General(format!(
            "peer {} is not authorized",
            peer.short_hex()
        )));
    }

    Ok(())
}

/// The ring provider's supported signature verification algorithms.
fn ring_signature_algorithms() -> &'static rustls::crypto::WebPkiSupportedAlgorithms {
    static ALGORITHMS: LazyLock<rustls::crypto::WebPkiSupportedAlgorithms> = LazyLock::new(|| {
        rustls::crypto::ring::default_provider().signature_verification_algorithms
    });
    &ALGORITHMS
}

// ---------------------------------------------------------------------------
// Connecting side: verifies the accepting peer's certificate
// ---------------------------------------------------------------------------

/// Server-certificate verifier that pins key identities instead of
/// validating a chain.
///
/// The server name in the handshake is ignored: identity certificates
/// carry no hostnames.
#[derive(Debug)]
pub struct IdentityServerCertVerifier {
    authz: PeerAuthorization,
}

impl IdentityServerCertVerifier {
    pub fn new(authz: PeerAuthorization) -> Self {
        Self { authz }
    }
}

impl ServerCertVerifier for IdentityServerCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        authorize_peer(end_entity, &self.authz)?;
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ring_signature_algorithms().supported_schemes()
    }
}

// ---------------------------------------------------------------------------
// Accepting side: verifies the connecting peer's certificate
// ---------------------------------------------------------------------------

/// Client-certificate verifier that pins key identities instead of
/// validating a chain. Client certificates are required: the transport is
/// mutually authenticated.
#[derive(Debug)]
pub struct IdentityClientCertVerifier {
    authz: PeerAuthorization,
}

impl IdentityClientCertVerifier {
    pub fn new(authz: PeerAuthorization) -> Self {
        Self { authz }
    }
}

impl ClientCertVerifier for IdentityClientCertVerifier {
    fn root_hint_subjects(&self) -> &[rustls::DistinguishedName] {
        // Self-signed certificates: there are no CA roots to hint.
        &[]
    }

    fn verify_client_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _now: UnixTime,
    ) -> Result<ClientCertVerified, TlsError> {
        authorize_peer(end_entity, &self.authz)?;
        Ok(ClientCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ring_signature_algorithms().supported_schemes()
    }
}
