//! Pluggable transport-credential resolution for Tessera test fixtures.
//!
//! Resolves a symbolic credential type name into transport-security
//! material for both connection roles. Four built-in types are always
//! available: `insecure`, `alts` (identity-authenticated), `tls` (test-CA
//! TLS), and `google_default` (ambient platform trust). Additional named
//! types can be registered at runtime without the calling code knowing
//! them at compile time.
//!
//! ```no_run
//! use tessera_creds::{
//!     ChannelConfig, CredentialsProvider, TLS_CREDENTIALS_TYPE, get_credentials_provider,
//! };
//!
//! let mut config = ChannelConfig::new();
//! let creds = get_credentials_provider()
//!     .channel_credentials(TLS_CREDENTIALS_TYPE, &mut config)
//!     .expect("tls is always available");
//! assert!(creds.is_secure());
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod global;
pub mod material;
pub mod provider;
pub mod registry;

pub use config::CredentialsConfig;
pub use credentials::{
    AltsCredentialsOptions, AltsServerCredentialsOptions, ChannelConfig, ChannelCredentials,
    PemKeyCertPair, ServerCredentials, alts_channel_credentials, alts_server_credentials,
    insecure_channel_credentials, insecure_server_credentials,
    platform_default_channel_credentials, ssl_channel_credentials, ssl_server_credentials,
};
pub use error::CredsError;
pub use global::{get_credentials_provider, set_credentials_provider};
pub use provider::{
    ALTS_CREDENTIALS_TYPE, CredentialTypeProvider, CredentialsProvider,
    GOOGLE_DEFAULT_CREDENTIALS_TYPE, INSECURE_CREDENTIALS_TYPE, TLS_CREDENTIALS_TYPE,
};
pub use registry::{DefaultCredentialsProvider, TLS_SERVER_NAME_OVERRIDE};
