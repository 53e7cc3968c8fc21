//! Process-wide credentials provider accessor.
//!
//! One provider instance serves the whole process: either installed
//! explicitly (once, before first use) or constructed lazily from the
//! environment on first access. `OnceLock` makes the lazy construction
//! safe against concurrent first calls.

use std::sync::OnceLock;

use crate::provider::CredentialsProvider;
use crate::registry::DefaultCredentialsProvider;

/// One-shot slot holding a provider.
///
/// Kept separate from the static so the install-once contract is testable
/// on non-global instances.
struct ProviderSlot {
    inner: OnceLock<Box<dyn CredentialsProvider>>,
}

impl ProviderSlot {
    const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// The installed provider, constructing the default lazily.
    fn get_or_default(&self) -> &dyn CredentialsProvider {
        self.inner
            .get_or_init(|| Box::new(DefaultCredentialsProvider::new()))
            .as_ref()
    }

    /// Install `provider`.
    ///
    /// # Panics
    /// Panics if a provider is already installed, including implicitly by
    /// a prior [`ProviderSlot::get_or_default`].
    fn install(&self, provider: Box<dyn CredentialsProvider>) {
        if self.inner.set(provider).is_err() {
            panic!("credentials provider already installed; install must happen before first use");
        }
    }
}

static PROVIDER: ProviderSlot = ProviderSlot::new();

/// The process-wide credentials provider, constructing the default on
/// first call.
pub fn get_credentials_provider() -> &'static dyn CredentialsProvider {
    PROVIDER.get_or_default()
}

/// Install the process-wide credentials provider.
///
/// # Panics
/// Panics if a provider is already installed. This is a one-shot override
/// meant to run early, before any [`get_credentials_provider`] call.
pub fn set_credentials_provider(provider: Box<dyn CredentialsProvider>) {
    PROVIDER.install(provider);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{ChannelConfig, ChannelCredentials, ServerCredentials};
    use crate::provider::CredentialTypeProvider;

    /// Minimal provider whose type list identifies it.
    struct StubProvider;

    impl CredentialsProvider for StubProvider {
        fn add_secure_type(
            &self,
            _type_name: String,
            _provider: Box<dyn CredentialTypeProvider>,
        ) {
        }

        fn channel_credentials(
            &self,
            _type_name: &str,
            _config: &mut ChannelConfig,
        ) -> Option<ChannelCredentials> {
            None
        }

        fn server_credentials(&self, _type_name: &str) -> Option<ServerCredentials> {
            None
        }

        fn secure_credentials_type_list(&self) -> Vec<String> {
            vec!["stub".to_string()]
        }
    }

    fn as_data_ptr(provider: &dyn CredentialsProvider) -> *const () {
        provider as *const dyn CredentialsProvider as *const ()
    }

    #[test]
    fn install_then_get_returns_the_installed_provider() {
        let slot = ProviderSlot::new();
        slot.install(Box::new(StubProvider));
        assert_eq!(
            slot.get_or_default().secure_credentials_type_list(),
            vec!["stub".to_string()]
        );
    }

    #[test]
    fn get_returns_the_same_instance_every_time() {
        let slot = ProviderSlot::new();
        let first = as_data_ptr(slot.get_or_default());
        let second = as_data_ptr(slot.get_or_default());
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "already installed")]
    fn double_install_is_fatal() {
        let slot = ProviderSlot::new();
        slot.install(Box::new(StubProvider));
        slot.install(Box::new(StubProvider));
    }

    #[test]
    #[should_panic(expected = "already installed")]
    fn install_after_first_use_is_fatal() {
        let slot = ProviderSlot::new();
        let _ = slot.get_or_default();
        slot.install(Box::new(StubProvider));
    }
}
