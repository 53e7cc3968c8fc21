//! Credential-provider capability interfaces and reserved type names.

use crate::credentials::{ChannelConfig, ChannelCredentials, ServerCredentials};

/// Reserved name for credentials that disable transport security.
pub const INSECURE_CREDENTIALS_TYPE: &str = "insecure";

/// Reserved name for the identity-authenticated transport.
pub const ALTS_CREDENTIALS_TYPE: &str = "alts";

/// Reserved name for certificate-authority TLS against the test CA.
pub const TLS_CREDENTIALS_TYPE: &str = "tls";

/// Reserved name for the platform's ambient default credentials.
pub const GOOGLE_DEFAULT_CREDENTIALS_TYPE: &str = "google_default";

/// Builds credentials for one named credential type.
///
/// Implementations are registered with a [`CredentialsProvider`] (which
/// takes ownership) and invoked under its lock, so construction must be
/// cheap and non-blocking.
pub trait CredentialTypeProvider: Send + Sync {
    /// Build credentials for the side that opens connections. May mutate
    /// `config`, e.g. to force the verification hostname.
    fn channel_credentials(&self, config: &mut ChannelConfig) -> ChannelCredentials;

    /// Build credentials for the side that accepts connections.
    fn server_credentials(&self) -> ServerCredentials;
}

/// Resolves credential type names into material for both connection roles.
///
/// `None` from a resolution method means the name is unsupported; callers
/// treat that as "cannot proceed with this type", never as an abort.
pub trait CredentialsProvider: Send + Sync {
    /// Register `provider` under `type_name`, replacing any existing entry
    /// for that name in place (its position is preserved).
    ///
    /// The four reserved names are resolved before the registered table is
    /// consulted, so registering one of them never affects resolution.
    fn add_secure_type(&self, type_name: String, provider: Box<dyn CredentialTypeProvider>);

    /// Resolve credentials for the connection-opening side.
    fn channel_credentials(
        &self,
        type_name: &str,
        config: &mut ChannelConfig,
    ) -> Option<ChannelCredentials>;

    /// Resolve credentials for the connection-accepting side.
    fn server_credentials(&self, type_name: &str) -> Option<ServerCredentials>;

    /// Secure type names usable for discovery: the `tls` built-in followed
    /// by every registered name in registration order.
    fn secure_credentials_type_list(&self) -> Vec<String>;
}
