// OS keyring backend for `CredentialStore`.

use tracing::trace;

use unidash_core::{CredentialError, CredentialStore};

/// `CredentialStore` backed by the platform secret service
/// (Keychain, Credential Manager, Secret Service).
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }
}

fn entry(service: &str, key: &str) -> Result<keyring::Entry, CredentialError> {
    keyring::Entry::new(service, key).map_err(|e| store_err("failed to access keyring", &e))
}

fn store_err(context: &str, err: &keyring::Error) -> CredentialError {
    CredentialError::Store {
        message: format!("{context}: {err}"),
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, CredentialError> {
        trace!(service, key, "keyring lookup");
        match entry(service, key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(store_err("failed to read from keyring", &e)),
        }
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), CredentialError> {
        trace!(service, key, "keyring write");
        entry(service, key)?
            .set_password(value)
            .map_err(|e| store_err("failed to store in keyring", &e))
    }

    fn delete(&self, service: &str, key: &str) -> Result<(), CredentialError> {
        trace!(service, key, "keyring delete");
        match entry(service, key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(store_err("failed to delete from keyring", &e)),
        }
    }
}
