//! External configuration for the default credentials provider.
//!
//! Mirrors the knobs a test runner sets before any credentials are
//! resolved: an optional custom acceptor key/certificate pair. Read once,
//! before provider construction; immutable afterwards.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the custom acceptor private-key file.
pub const TLS_KEY_FILE_ENV: &str = "TESSERA_TLS_KEY_FILE";

/// Environment variable naming the custom acceptor certificate file.
pub const TLS_CERT_FILE_ENV: &str = "TESSERA_TLS_CERT_FILE";

/// Configuration consumed once at provider construction.
#[derive(Debug, Clone, Default)]
pub struct CredentialsConfig {
    /// Custom acceptor private-key file, if any.
    pub tls_key_file: Option<PathBuf>,
    /// Custom acceptor certificate file, if any.
    pub tls_cert_file: Option<PathBuf>,
}

impl CredentialsConfig {
    /// Read configuration from the process environment. Unset or empty
    /// variables mean "no override".
    pub fn from_env() -> Self {
        Self {
            tls_key_file: path_from_env(TLS_KEY_FILE_ENV),
            tls_cert_file: path_from_env(TLS_CERT_FILE_ENV),
        }
    }
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_overrides() {
        let config = CredentialsConfig::default();
        assert!(config.tls_key_file.is_none());
        assert!(config.tls_cert_file.is_none());
    }
}
