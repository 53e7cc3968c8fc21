//! The default credentials provider: built-in types plus a registry of
//! custom ones.
//!
//! The four reserved names resolve directly against built-in material.
//! Everything else goes through the registered-provider table, an ordered
//! association guarded by one mutex held for the duration of each
//! operation. All traffic here is setup-time traffic.

use std::path::Path;
use std::sync::Mutex;

use tracing::error;

use crate::config::CredentialsConfig;
use crate::credentials::{
    self, AltsCredentialsOptions, AltsServerCredentialsOptions, ChannelConfig, ChannelCredentials,
    PemKeyCertPair, ServerCredentials,
};
use crate::material;
use crate::provider::{
    ALTS_CREDENTIALS_TYPE, CredentialTypeProvider, CredentialsProvider,
    GOOGLE_DEFAULT_CREDENTIALS_TYPE, INSECURE_CREDENTIALS_TYPE, TLS_CREDENTIALS_TYPE,
};

/// Verification hostname forced onto channels using the `tls` built-in, so
/// the committed test certificates validate regardless of the dialed
/// address.
pub const TLS_SERVER_NAME_OVERRIDE: &str = "foo.tessera.test";

/// Default material for the `tls` built-in, committed under `testdata/`.
const CA_CERT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/ca.pem");
const SERVER_CERT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/server1.pem");
const SERVER_KEY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/server1.key");

/// Load built-in or configured credential material.
///
/// # Panics
/// Panics when the file cannot be read: at this layer a missing key or
/// certificate is a broken test setup, not a recoverable condition.
fn load_material(path: impl AsRef<Path>) -> Vec<u8> {
    material::read(path.as_ref()).unwrap_or_else(|e| panic!("{e}"))
}

/// The default [`CredentialsProvider`].
///
/// Resolves the four built-in types directly and keeps a single-lock
/// registry of custom providers in registration order.
pub struct DefaultCredentialsProvider {
    /// Registered (name, provider) pairs. One mutex guards names and
    /// providers as a unit so a replacement can never be observed halfway.
    added_types: Mutex<Vec<(String, Box<dyn CredentialTypeProvider>)>>,
    /// Custom acceptor material, read once at construction.
    custom_server_key: Option<Vec<u8>>,
    custom_server_cert: Option<Vec<u8>>,
}

impl DefaultCredentialsProvider {
    /// Build a provider configured from the process environment.
    ///
    /// # Panics
    /// Panics if a configured custom key or certificate file cannot be
    /// read.
    pub fn new() -> Self {
        Self::with_config(CredentialsConfig::from_env())
    }

    /// Build a provider from explicit configuration.
    ///
    /// # Panics
    /// Panics if a configured custom key or certificate file cannot be
    /// read.
    pub fn with_config(config: CredentialsConfig) -> Self {
        let custom_server_key = config.tls_key_file.as_deref().map(load_material);
        let custom_server_cert = config.tls_cert_file.as_deref().map(load_material);
        Self {
            added_types: Mutex::new(Vec::new()),
            custom_server_key,
            custom_server_cert,
        }
    }

    /// The custom acceptor pair, present only when both halves were
    /// configured. A lone key or certificate falls back to the defaults.
    fn custom_server_identity(&self) -> Option<PemKeyCertPair> {
        match (&self.custom_server_key, &self.custom_server_cert) {
            (Some(key), Some(cert)) => Some(PemKeyCertPair {
                private_key: key.clone(),
                certificate_chain: cert.clone(),
            }),
            _ => None,
        }
    }

    /// Resolve `type_name` against the built-in channel types.
    ///
    /// # Panics
    /// Panics if built-in material cannot be loaded or assembled; the
    /// default files are a precondition for the built-ins.
    fn builtin_channel_credentials(
        &self,
        type_name: &str,
        config: &mut ChannelConfig,
    ) -> Option<ChannelCredentials> {
        match type_name {
            INSECURE_CREDENTIALS_TYPE => Some(credentials::insecure_channel_credentials()),
            ALTS_CREDENTIALS_TYPE => Some(
                credentials::alts_channel_credentials(AltsCredentialsOptions::default())
                    .unwrap_or_else(|e| panic!("identity channel credentials failed: {e}")),
            ),
            TLS_CREDENTIALS_TYPE => {
                let ca = load_material(CA_CERT_PATH);
                config.set_server_name_override(TLS_SERVER_NAME_OVERRIDE);
                Some(
                    credentials::ssl_channel_credentials(&ca, None)
                        .unwrap_or_else(|e| panic!("default CA bundle is invalid: {e}")),
                )
            }
            GOOGLE_DEFAULT_CREDENTIALS_TYPE => Some(
                credentials::platform_default_channel_credentials()
                    .unwrap_or_else(|e| panic!("platform default credentials unavailable: {e}")),
            ),
            _ => None,
        }
    }

    /// Resolve `type_name` against the built-in server types.
    ///
    /// `google_default` has no server form and falls through to the
    /// registered table.
    ///
    /// # Panics
    /// Panics if built-in material cannot be loaded or assembled.
    fn builtin_server_credentials(&self, type_name: &str) -> Option<ServerCredentials> {
        match type_name {
            INSECURE_CREDENTIALS_TYPE => Some(credentials::insecure_server_credentials()),
            ALTS_CREDENTIALS_TYPE => Some(
                credentials::alts_server_credentials(AltsServerCredentialsOptions::default())
                    .unwrap_or_else(|e| panic!("identity server credentials failed: {e}")),
            ),
            TLS_CREDENTIALS_TYPE => {
                let pair = self.custom_server_identity().unwrap_or_else(|| PemKeyCertPair {
                    private_key: load_material(SERVER_KEY_PATH),
                    certificate_chain: load_material(SERVER_CERT_PATH),
                });
                Some(
                    credentials::ssl_server_credentials(None, vec![pair])
                        .unwrap_or_else(|e| panic!("server key/cert material is invalid: {e}")),
                )
            }
            _ => None,
        }
    }
}

impl Default for DefaultCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for DefaultCredentialsProvider {
    fn add_secure_type(&self, type_name: String, provider: Box<dyn CredentialTypeProvider>) {
        let mut added = self.added_types.lock().unwrap();
        match added.iter_mut().find(|(name, _)| *name == type_name) {
            Some(entry) => entry.1 = provider,
            None => added.push((type_name, provider)),
        }
    }

    fn channel_credentials(
        &self,
        type_name: &str,
        config: &mut ChannelConfig,
    ) -> Option<ChannelCredentials> {
        if let Some(creds) = self.builtin_channel_credentials(type_name, config) {
            return Some(creds);
        }

        // The lock is held across the provider call so a racing
        // replacement can never hand out a half-installed provider.
        let added = self.added_types.lock().unwrap();
        match added.iter().find(|(name, _)| name == type_name) {
            Some((_, provider)) => Some(provider.channel_credentials(config)),
            None => {
                error!(%type_name, "unsupported credentials type");
                None
            }
        }
    }

    fn server_credentials(&self, type_name: &str) -> Option<ServerCredentials> {
        if let Some(creds) = self.builtin_server_credentials(type_name) {
            return Some(creds);
        }

        let added = self.added_types.lock().unwrap();
        match added.iter().find(|(name, _)| name == type_name) {
            Some((_, provider)) => Some(provider.server_credentials()),
            None => {
                error!(%type_name, "unsupported credentials type");
                None
            }
        }
    }

    fn secure_credentials_type_list(&self) -> Vec<String> {
        let mut types = vec![TLS_CREDENTIALS_TYPE.to_string()];
        let added = self.added_types.lock().unwrap();
        types.extend(added.iter().map(|(name, _)| name.clone()));
        types
    }
}
