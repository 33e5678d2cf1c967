// ── Credential resolution ──
//
// Username/password lookup: stored secrets first, interactive prompt as
// fallback, newly entered secrets written back. The secret backend and the
// prompt are both injected so the flow runs without a keyring or a TTY.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::CoreError;

/// Store key for the username.
pub const USERNAME_KEY: &str = "username";
/// Store key for the password.
pub const PASSWORD_KEY: &str = "password";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential store error: {message}")]
    Store { message: String },

    #[error("credential prompt failed: {message}")]
    Prompt { message: String },
}

// ── Credentials ─────────────────────────────────────────────────────

/// A username/password pair. The password never shows up in `Debug`.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ── Seams ───────────────────────────────────────────────────────────

/// Opaque secret storage keyed by `(service, key)`.
pub trait CredentialStore: Send + Sync {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, CredentialError>;

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), CredentialError>;

    /// Remove an entry. Removing a missing entry is not an error.
    fn delete(&self, service: &str, key: &str) -> Result<(), CredentialError>;
}

/// Interactive credential entry. `Ok(None)` means the user cancelled.
pub trait CredentialPrompt: Send + Sync {
    fn prompt_username(&self) -> Result<Option<String>, CredentialError>;

    /// Must not echo the input.
    fn prompt_password(&self, username: &str) -> Result<Option<SecretString>, CredentialError>;
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-local `CredentialStore`, for tests and keyring-less setups.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a username/password pair under `service`.
    pub fn with_credentials(service: &str, username: &str, password: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = lock(&store.entries);
            entries.insert((service.into(), USERNAME_KEY.into()), username.into());
            entries.insert((service.into(), PASSWORD_KEY.into()), password.into());
        }
        store
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, service: &str, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(lock(&self.entries)
            .get(&(service.to_owned(), key.to_owned()))
            .cloned())
    }

    fn set(&self, service: &str, key: &str, value: &str) -> Result<(), CredentialError> {
        lock(&self.entries).insert((service.to_owned(), key.to_owned()), value.to_owned());
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> Result<(), CredentialError> {
        lock(&self.entries).remove(&(service.to_owned(), key.to_owned()));
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Provider ────────────────────────────────────────────────────────

/// Resolves credentials for the controller login.
///
/// Resolution order: in-memory memo, then the store, then the prompt.
/// The memo lives until [`invalidate`](Self::invalidate) (called after a
/// failed login) or [`forget`](Self::forget).
pub struct CredentialProvider {
    service: String,
    store: Arc<dyn CredentialStore>,
    prompt: Box<dyn CredentialPrompt>,
    memo: Mutex<Option<Credentials>>,
}

impl CredentialProvider {
    pub fn new(
        service: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        prompt: Box<dyn CredentialPrompt>,
    ) -> Self {
        Self {
            service: service.into(),
            store,
            prompt,
            memo: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Resolve a username/password pair.
    ///
    /// Stored values are returned without validation. When either is
    /// missing the user is prompted for both; cancelling returns
    /// [`CoreError::LoginCancelled`] and leaves the store untouched.
    pub fn resolve(&self) -> Result<Credentials, CoreError> {
        let mut memo = lock(&self.memo);
        if let Some(credentials) = memo.as_ref() {
            return Ok(credentials.clone());
        }

        let credentials = if let Some(stored) = self.stored() {
            debug!(username = stored.username(), "using stored credentials");
            stored
        } else {
            self.prompt_and_store()?
        };

        *memo = Some(credentials.clone());
        Ok(credentials)
    }

    /// Drop the in-memory memo; the next `resolve` re-reads the store.
    pub fn invalidate(&self) {
        *lock(&self.memo) = None;
    }

    /// Delete the stored credentials so the next `resolve` prompts again.
    pub fn forget(&self) -> Result<(), CoreError> {
        self.invalidate();
        self.store.delete(&self.service, USERNAME_KEY)?;
        self.store.delete(&self.service, PASSWORD_KEY)?;
        info!(service = %self.service, "stored credentials removed");
        Ok(())
    }

    /// Prompt for credentials and store them, regardless of what is
    /// currently stored.
    pub fn replace(&self) -> Result<Credentials, CoreError> {
        let credentials = self.prompt_and_store()?;
        *lock(&self.memo) = Some(credentials.clone());
        Ok(credentials)
    }

    /// Both stored values, if present and non-empty. A failing backend is
    /// treated as empty so the prompt can still take over.
    fn stored(&self) -> Option<Credentials> {
        let username = self.read(USERNAME_KEY)?;
        let password = self.read(PASSWORD_KEY)?;
        Some(Credentials::new(username, SecretString::from(password)))
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(&self.service, key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "credential store read failed");
                None
            }
        }
    }

    fn prompt_and_store(&self) -> Result<Credentials, CoreError> {
        let Some(username) = self.prompt.prompt_username()? else {
            debug!("username prompt cancelled");
            return Err(CoreError::LoginCancelled);
        };
        let Some(password) = self.prompt.prompt_password(&username)? else {
            debug!("password prompt cancelled");
            return Err(CoreError::LoginCancelled);
        };

        // A failed write only costs a re-prompt next run.
        for (key, value) in [
            (USERNAME_KEY, username.as_str()),
            (PASSWORD_KEY, password.expose_secret()),
        ] {
            if let Err(e) = self.store.set(&self.service, key, value) {
                warn!(key, error = %e, "failed to persist credential");
            }
        }

        Ok(Credentials::new(username, password))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const SERVICE: &str = "UniFiDashboard";

    /// Prompt returning fixed answers and counting invocations.
    struct FixedPrompt {
        username: Option<&'static str>,
        password: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl CredentialPrompt for FixedPrompt {
        fn prompt_username(&self) -> Result<Option<String>, CredentialError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.username.map(String::from))
        }

        fn prompt_password(&self, _username: &str) -> Result<Option<SecretString>, CredentialError> {
            Ok(self.password.map(|p| SecretString::from(p.to_string())))
        }
    }

    fn provider(
        store: Arc<MemoryCredentialStore>,
        username: Option<&'static str>,
        password: Option<&'static str>,
    ) -> (CredentialProvider, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompt = FixedPrompt {
            username,
            password,
            calls: Arc::clone(&calls),
        };
        (CredentialProvider::new(SERVICE, store, Box::new(prompt)), calls)
    }

    #[test]
    fn stored_credentials_skip_the_prompt() {
        let store = Arc::new(MemoryCredentialStore::with_credentials(SERVICE, "admin", "hunter2"));
        let (provider, calls) = provider(store, None, None);

        let creds = provider.resolve().unwrap();
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password().expose_secret(), "hunter2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn partial_store_prompts_and_overwrites() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(SERVICE, USERNAME_KEY, "stale").unwrap();
        let (provider, calls) = provider(Arc::clone(&store), Some("admin"), Some("pw"));

        let creds = provider.resolve().unwrap();
        assert_eq!(creds.username(), "admin");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(SERVICE, USERNAME_KEY).unwrap().as_deref(), Some("admin"));
        assert_eq!(store.get(SERVICE, PASSWORD_KEY).unwrap().as_deref(), Some("pw"));
    }

    #[test]
    fn cancelled_username_writes_nothing() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (provider, _) = provider(Arc::clone(&store), None, Some("pw"));

        assert!(matches!(provider.resolve(), Err(CoreError::LoginCancelled)));
        assert!(store.is_empty());
    }

    #[test]
    fn cancelled_password_writes_nothing() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (provider, _) = provider(Arc::clone(&store), Some("admin"), None);

        assert!(matches!(provider.resolve(), Err(CoreError::LoginCancelled)));
        assert!(store.is_empty());
    }

    #[test]
    fn resolution_is_memoised_until_invalidated() {
        let store = Arc::new(MemoryCredentialStore::with_credentials(SERVICE, "admin", "one"));
        let (provider, _) = provider(Arc::clone(&store), None, None);

        assert_eq!(provider.resolve().unwrap().password().expose_secret(), "one");
        store.set(SERVICE, PASSWORD_KEY, "two").unwrap();
        assert_eq!(provider.resolve().unwrap().password().expose_secret(), "one");

        provider.invalidate();
        assert_eq!(provider.resolve().unwrap().password().expose_secret(), "two");
    }

    #[test]
    fn forget_clears_store_and_forces_prompt() {
        let store = Arc::new(MemoryCredentialStore::with_credentials(SERVICE, "admin", "old"));
        let (provider, calls) = provider(Arc::clone(&store), Some("admin"), Some("new"));

        provider.resolve().unwrap();
        provider.forget().unwrap();
        assert!(store.is_empty());

        let creds = provider.resolve().unwrap();
        assert_eq!(creds.password().expose_secret(), "new");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_output_redacts_password() {
        let creds = Credentials::new("admin", SecretString::from("hunter2".to_string()));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
