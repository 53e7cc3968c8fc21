//! Channel and server credential types and their constructors.
//!
//! A credential is assembled configuration: either "no transport security"
//! or a ready `rustls` config for one connection role. The cryptographic
//! protocols themselves are rustls's job; this module only decides what
//! goes into each config.

use std::sync::Arc;

use quinn::crypto::rustls::{QuicClientConfig, QuicServerConfig};
use rustls::RootCertStore;
use tessera_identity::tls::{ALPN_TESSERA, client_tls_config, server_tls_config};
use tessera_identity::{Identity, PeerAuthorization};
use tracing::warn;

use crate::error::{CredsError, Result};
use crate::material;

/// Environment variable naming a PEM bundle that overrides the ambient
/// trust anchors used by platform-default credentials.
pub const PLATFORM_CA_BUNDLE_ENV: &str = "SSL_CERT_FILE";

/// Per-connection settings the channel dialer consults.
///
/// Credential resolution may mutate this: the `tls` built-in forces the
/// expected server name so that test certificates verify against a fixed
/// hostname rather than the dialed address.
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    server_name_override: Option<String>,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force hostname verification to check `name` instead of the dialed
    /// target.
    pub fn set_server_name_override(&mut self, name: impl Into<String>) {
        self.server_name_override = Some(name.into());
    }

    /// The forced verification name, if any.
    pub fn server_name_override(&self) -> Option<&str> {
        self.server_name_override.as_deref()
    }
}

/// A PEM private key and the certificate chain it belongs to.
#[derive(Debug, Clone)]
pub struct PemKeyCertPair {
    pub private_key: Vec<u8>,
    pub certificate_chain: Vec<u8>,
}

enum ChannelKind {
    Insecure,
    Tls(rustls::ClientConfig),
}

/// Transport-security material for the side that opens connections.
pub struct ChannelCredentials {
    kind: ChannelKind,
}

impl ChannelCredentials {
    /// True unless these credentials disable transport security.
    pub fn is_secure(&self) -> bool {
        !matches!(self.kind, ChannelKind::Insecure)
    }

    /// The assembled rustls config, when these credentials are secure.
    pub fn tls_config(&self) -> Option<&rustls::ClientConfig> {
        match &self.kind {
            ChannelKind::Insecure => None,
            ChannelKind::Tls(config) => Some(config),
        }
    }

    /// Convert into a quinn client config for dialing.
    ///
    /// Insecure credentials yield [`CredsError::InsecureTransport`]: QUIC
    /// mandates TLS.
    pub fn quic_client_config(&self) -> Result<quinn::ClientConfig> {
        match &self.kind {
            ChannelKind::Insecure => Err(CredsError::InsecureTransport),
            ChannelKind::Tls(config) => {
                let crypto = QuicClientConfig::try_from(config.clone())
                    .map_err(|e| CredsError::TlsConfig(format!("QUIC client config: {e}")))?;
                Ok(quinn::ClientConfig::new(Arc::new(crypto)))
            }
        }
    }
}

impl std::fmt::Debug for ChannelCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ChannelKind::Insecure => f.write_str("ChannelCredentials(insecure)"),
            ChannelKind::Tls(_) => f.write_str("ChannelCredentials(tls)"),
        }
    }
}

enum ServerKind {
    Insecure,
    Tls(rustls::ServerConfig),
}

/// Transport-security material for the side that accepts connections.
pub struct ServerCredentials {
    kind: ServerKind,
}

impl ServerCredentials {
    /// True unless these credentials disable transport security.
    pub fn is_secure(&self) -> bool {
        !matches!(self.kind, ServerKind::Insecure)
    }

    /// The assembled rustls config, when these credentials are secure.
    pub fn tls_config(&self) -> Option<&rustls::ServerConfig> {
        match &self.kind {
            ServerKind::Insecure => None,
            ServerKind::Tls(config) => Some(config),
        }
    }

    /// Convert into a quinn server config for binding a listener.
    ///
    /// Insecure credentials yield [`CredsError::InsecureTransport`]: QUIC
    /// mandates TLS.
    pub fn quic_server_config(&self) -> Result<quinn::ServerConfig> {
        match &self.kind {
            ServerKind::Insecure => Err(CredsError::InsecureTransport),
            ServerKind::Tls(config) => {
                let crypto = QuicServerConfig::try_from(config.clone())
                    .map_err(|e| CredsError::TlsConfig(format!("QUIC server config: {e}")))?;
                Ok(quinn::ServerConfig::with_crypto(Arc::new(crypto)))
            }
        }
    }
}

impl std::fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ServerKind::Insecure => f.write_str("ServerCredentials(insecure)"),
            ServerKind::Tls(_) => f.write_str("ServerCredentials(tls)"),
        }
    }
}

/// Channel credentials that disable transport security.
pub fn insecure_channel_credentials() -> ChannelCredentials {
    ChannelCredentials {
        kind: ChannelKind::Insecure,
    }
}

/// Server credentials that disable transport security.
pub fn insecure_server_credentials() -> ServerCredentials {
    ServerCredentials {
        kind: ServerKind::Insecure,
    }
}

/// Options for identity-authenticated channel credentials.
#[derive(Default)]
pub struct AltsCredentialsOptions {
    /// Identity to present; an ephemeral one is generated when absent.
    pub identity: Option<Identity>,
    /// Which acceptor identities to admit.
    pub peer_authorization: PeerAuthorization,
}

/// Options for identity-authenticated server credentials.
#[derive(Default)]
pub struct AltsServerCredentialsOptions {
    /// Identity to present; an ephemeral one is generated when absent.
    pub identity: Option<Identity>,
    /// Which connecting identities to admit.
    pub peer_authorization: PeerAuthorization,
}

/// Build channel credentials for the identity-authenticated transport.
///
/// Default options generate an ephemeral identity and accept any
/// authenticated peer. No file I/O is involved.
pub fn alts_channel_credentials(options: AltsCredentialsOptions) -> Result<ChannelCredentials> {
    let identity = match options.identity {
        Some(identity) => identity,
        None => Identity::generate(unix_now())?,
    };
    let config = client_tls_config(&identity, options.peer_authorization)?;
    Ok(ChannelCredentials {
        kind: ChannelKind::Tls(config),
    })
}

/// Build server credentials for the identity-authenticated transport.
///
/// Default options generate an ephemeral identity and accept any
/// authenticated peer. No file I/O is involved.
pub fn alts_server_credentials(options: AltsServerCredentialsOptions) -> Result<ServerCredentials> {
    let identity = match options.identity {
        Some(identity) => identity,
        None => Identity::generate(unix_now())?,
    };
    let config = server_tls_config(&identity, options.peer_authorization)?;
    Ok(ServerCredentials {
        kind: ServerKind::Tls(config),
    })
}

/// Build channel credentials trusting `root_certs_pem`, optionally
/// presenting a client certificate.
pub fn ssl_channel_credentials(
    root_certs_pem: &[u8],
    key_cert_pair: Option<&PemKeyCertPair>,
) -> Result<ChannelCredentials> {
    let roots = material::root_store_from_pem(root_certs_pem)?;

    let builder = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(&[&rustls::version::TLS13])
    .map_err(|e| CredsError::TlsConfig(format!("TLS version config: {e}")))?
    .with_root_certificates(roots);

    let mut config = match key_cert_pair {
        Some(pair) => {
            let chain = material::certs_from_pem(&pair.certificate_chain)?;
            let key = material::private_key_from_pem(&pair.private_key)?;
            builder
                .with_client_auth_cert(chain, key)
                .map_err(|e| CredsError::TlsConfig(format!("client cert config: {e}")))?
        }
        None => builder.with_no_client_auth(),
    };
    config.alpn_protocols = vec![ALPN_TESSERA.to_vec()];

    Ok(ChannelCredentials {
        kind: ChannelKind::Tls(config),
    })
}

/// Build server credentials from an ordered sequence of key/cert pairs.
///
/// rustls serves a single identity per config, so the first pair is used
/// and any extras are logged and skipped. Passing `client_root_certs`
/// turns on client-certificate verification against those roots.
pub fn ssl_server_credentials(
    client_root_certs: Option<&[u8]>,
    mut key_cert_pairs: Vec<PemKeyCertPair>,
) -> Result<ServerCredentials> {
    if key_cert_pairs.is_empty() {
        return Err(CredsError::TlsConfig("no key/cert pair supplied".into()));
    }
    if key_cert_pairs.len() > 1 {
        warn!(
            skipped = key_cert_pairs.len() - 1,
            "multiple key/cert pairs supplied; using the first"
        );
    }
    let pair = key_cert_pairs.remove(0);
    let chain = material::certs_from_pem(&pair.certificate_chain)?;
    let key = material::private_key_from_pem(&pair.private_key)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = rustls::ServerConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&[&rustls::version::TLS13])
        .map_err(|e| CredsError::TlsConfig(format!("TLS version config: {e}")))?;

    let builder = match client_root_certs {
        Some(pem) => {
            let roots = material::root_store_from_pem(pem)?;
            let verifier =
                rustls::server::WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
                    .build()
                    .map_err(|e| CredsError::TlsConfig(format!("client verifier: {e}")))?;
            builder.with_client_cert_verifier(verifier)
        }
        None => builder.with_no_client_auth(),
    };

    let mut config = builder
        .with_single_cert(chain, key)
        .map_err(|e| CredsError::TlsConfig(format!("server cert config: {e}")))?;
    config.alpn_protocols = vec![ALPN_TESSERA.to_vec()];

    Ok(ServerCredentials {
        kind: ServerKind::Tls(config),
    })
}

/// Build channel credentials from the platform's ambient trust anchors.
///
/// Honors `SSL_CERT_FILE` when set (errors reading or decoding that
/// bundle propagate); otherwise uses the bundled webpki roots.
pub fn platform_default_channel_credentials() -> Result<ChannelCredentials> {
    let roots = match std::env::var(PLATFORM_CA_BUNDLE_ENV) {
        Ok(path) if !path.is_empty() => {
            let pem = material::read(&path)?;
            material::root_store_from_pem(&pem)?
        }
        _ => {
            let mut roots = RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            roots
        }
    };

    let mut config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(&[&rustls::version::TLS13])
    .map_err(|e| CredsError::TlsConfig(format!("TLS version config: {e}")))?
    .with_root_certificates(roots)
    .with_no_client_auth();
    config.alpn_protocols = vec![ALPN_TESSERA.to_vec()];

    Ok(ChannelCredentials {
        kind: ChannelKind::Tls(config),
    })
}

/// Seconds since the Unix epoch, for ephemeral identity validity windows.
fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is set before the Unix epoch")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/ca.pem");
    const SERVER_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/server1.pem");
    const SERVER_KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/server1.key");

    fn test_pair() -> PemKeyCertPair {
        PemKeyCertPair {
            private_key: material::read(SERVER_KEY).expect("test key"),
            certificate_chain: material::read(SERVER_CERT).expect("test cert"),
        }
    }

    #[test]
    fn insecure_credentials_are_not_secure() {
        assert!(!insecure_channel_credentials().is_secure());
        assert!(!insecure_server_credentials().is_secure());
    }

    #[test]
    fn insecure_credentials_reject_quic_conversion() {
        let err = insecure_channel_credentials().quic_client_config().unwrap_err();
        assert!(matches!(err, CredsError::InsecureTransport));

        let err = insecure_server_credentials().quic_server_config().unwrap_err();
        assert!(matches!(err, CredsError::InsecureTransport));
    }

    #[test]
    fn alts_default_options_build_both_roles() {
        let channel = alts_channel_credentials(AltsCredentialsOptions::default())
            .expect("channel credentials should build");
        assert!(channel.is_secure());

        let server = alts_server_credentials(AltsServerCredentialsOptions::default())
            .expect("server credentials should build");
        assert!(server.is_secure());
    }

    #[test]
    fn alts_presents_a_supplied_identity() {
        let identity = Identity::generate(unix_now()).expect("identity gen");
        let creds = alts_channel_credentials(AltsCredentialsOptions {
            identity: Some(identity),
            peer_authorization: PeerAuthorization::AnyIdentity,
        })
        .expect("channel credentials should build");
        assert!(creds.is_secure());
    }

    #[test]
    fn ssl_channel_credentials_build_from_test_ca() {
        let ca = material::read(CA_CERT).expect("test CA");
        let creds = ssl_channel_credentials(&ca, None).expect("credentials should build");
        assert!(creds.is_secure());
        assert!(creds.tls_config().is_some());
    }

    #[test]
    fn ssl_channel_credentials_accept_a_client_pair() {
        let ca = material::read(CA_CERT).expect("test CA");
        let creds =
            ssl_channel_credentials(&ca, Some(&test_pair())).expect("credentials should build");
        assert!(creds.is_secure());
    }

    #[test]
    fn ssl_channel_credentials_reject_garbage_roots() {
        assert!(ssl_channel_credentials(b"garbage", None).is_err());
    }

    #[test]
    fn ssl_server_credentials_build_from_test_pair() {
        let creds =
            ssl_server_credentials(None, vec![test_pair()]).expect("credentials should build");
        assert!(creds.is_secure());
        assert!(creds.tls_config().is_some());
    }

    #[test]
    fn ssl_server_credentials_require_a_pair() {
        assert!(ssl_server_credentials(None, vec![]).is_err());
    }

    #[test]
    fn ssl_server_credentials_use_first_of_many_pairs() {
        let creds = ssl_server_credentials(None, vec![test_pair(), test_pair()])
            .expect("credentials should build");
        assert!(creds.is_secure());
    }

    #[test]
    fn ssl_server_credentials_with_client_verification_roots() {
        let ca = material::read(CA_CERT).expect("test CA");
        let creds = ssl_server_credentials(Some(&ca), vec![test_pair()])
            .expect("credentials should build");
        assert!(creds.is_secure());
    }

    #[test]
    fn secure_credentials_convert_to_quic_configs() {
        let ca = material::read(CA_CERT).expect("test CA");
        let channel = ssl_channel_credentials(&ca, None).expect("channel credentials");
        assert!(channel.quic_client_config().is_ok());

        let server = ssl_server_credentials(None, vec![test_pair()]).expect("server credentials");
        assert!(server.quic_server_config().is_ok());
    }

    #[test]
    fn channel_config_override_roundtrip() {
        let mut config = ChannelConfig::new();
        assert!(config.server_name_override().is_none());
        config.set_server_name_override("example.invalid");
        assert_eq!(config.server_name_override(), Some("example.invalid"));
    }
}
