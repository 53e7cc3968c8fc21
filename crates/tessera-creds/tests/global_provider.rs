//! Integration test: the process-wide accessor.
//!
//! Lives in its own test binary because the provider slot is truly global:
//! once the default is constructed here, nothing else in this process may
//! install a replacement. Tests therefore only exercise the lazy-default
//! path and shared registration, never `set_credentials_provider`.

use tessera_creds::{
    ChannelConfig, ChannelCredentials, CredentialTypeProvider, CredentialsProvider,
    INSECURE_CREDENTIALS_TYPE, ServerCredentials, TLS_CREDENTIALS_TYPE, get_credentials_provider,
    insecure_channel_credentials, insecure_server_credentials,
};

struct EchoProvider;

impl CredentialTypeProvider for EchoProvider {
    fn channel_credentials(&self, _config: &mut ChannelConfig) -> ChannelCredentials {
        insecure_channel_credentials()
    }

    fn server_credentials(&self) -> ServerCredentials {
        insecure_server_credentials()
    }
}

#[test]
fn accessor_returns_one_instance() {
    let first = get_credentials_provider();
    let second = get_credentials_provider();
    assert!(std::ptr::eq(
        first as *const dyn CredentialsProvider as *const (),
        second as *const dyn CredentialsProvider as *const (),
    ));
}

#[test]
fn default_provider_resolves_builtins() {
    let provider = get_credentials_provider();

    let mut config = ChannelConfig::new();
    let creds = provider
        .channel_credentials(INSECURE_CREDENTIALS_TYPE, &mut config)
        .expect("insecure should always resolve");
    assert!(!creds.is_secure());

    assert!(
        provider
            .secure_credentials_type_list()
            .contains(&TLS_CREDENTIALS_TYPE.to_string())
    );
}

#[test]
fn registration_through_the_accessor_is_visible() {
    let provider = get_credentials_provider();
    provider.add_secure_type("itest_custom".to_string(), Box::new(EchoProvider));

    let mut config = ChannelConfig::new();
    assert!(
        provider
            .channel_credentials("itest_custom", &mut config)
            .is_some()
    );
    assert!(
        provider
            .secure_credentials_type_list()
            .contains(&"itest_custom".to_string())
    );
}
