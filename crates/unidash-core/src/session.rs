// ── Controller session ──
//
// Owns the one authenticated session handle for the configured controller.
// The handle is either present and fully authenticated or absent; every
// transition (login, expiry, logout) happens under a single lock, and data
// calls hold the same lock so only one request is in flight per session.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use unidash_api::{ControllerClient, TransportConfig};

use crate::config::ControllerConfig;
use crate::credentials::CredentialProvider;
use crate::error::CoreError;

// ── SessionState ─────────────────────────────────────────────────

/// Observable authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

// ── Session ──────────────────────────────────────────────────────

/// An authenticated handle. The session cookie lives in the client's jar
/// and dies with it.
pub struct Session {
    id: Uuid,
    username: String,
    established_at: DateTime<Utc>,
    client: ControllerClient,
}

impl Session {
    fn new(username: String, client: ControllerClient) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            established_at: Utc::now(),
            client,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("established_at", &self.established_at)
            .field("controller", &self.client.base_url().as_str())
            .field("site", &self.client.site())
            .finish()
    }
}

// ── ControllerSession ────────────────────────────────────────────

/// Login lifecycle and authenticated GET for one controller and site.
pub struct ControllerSession {
    config: ControllerConfig,
    transport: TransportConfig,
    credentials: CredentialProvider,
    slot: Mutex<Option<Arc<Session>>>,
}

impl ControllerSession {
    /// Create an unauthenticated session manager. No I/O happens until
    /// [`login`](Self::login).
    pub fn new(config: ControllerConfig, credentials: CredentialProvider) -> Self {
        if config.tls.is_insecure() {
            warn!(
                controller = %config.url,
                "TLS certificate verification is disabled for this controller"
            );
        }
        let transport = config.transport();
        Self {
            config,
            transport,
            credentials,
            slot: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialProvider {
        &self.credentials
    }

    pub async fn state(&self) -> SessionState {
        if self.slot.lock().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// The current session, if authenticated.
    pub async fn current(&self) -> Option<Arc<Session>> {
        self.slot.lock().await.clone()
    }

    /// Authenticate, or reuse the existing session.
    ///
    /// With `force == false` an existing session is returned as-is with no
    /// network call. With `force == true` any existing session is discarded
    /// first. A single `POST /api/login` is attempted; failures are
    /// returned, never retried, and leave the state `Unauthenticated`.
    pub async fn login(&self, force: bool) -> Result<Arc<Session>, CoreError> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref() {
            if !force {
                debug!(session = %session.id(), "reusing authenticated session");
                return Ok(Arc::clone(session));
            }
        }
        if slot.take().is_some() {
            info!("discarding current session for forced re-login");
        }

        let client = ControllerClient::new(
            self.config.url.clone(),
            self.config.site.clone(),
            &self.transport,
        )?;
        let credentials = self.credentials.resolve()?;

        match client
            .login(credentials.username(), credentials.password())
            .await
        {
            Ok(()) => {
                if !client.has_session_cookie() {
                    warn!(
                        controller = %self.config.url,
                        "login accepted but no session cookie was set"
                    );
                }
                let session = Arc::new(Session::new(credentials.username().to_owned(), client));
                info!(
                    session = %session.id(),
                    controller = %self.config.url,
                    "authenticated"
                );
                *slot = Some(Arc::clone(&session));
                Ok(session)
            }
            Err(err) => {
                self.credentials.invalidate();
                warn!(error = %err, "login failed");
                Err(CoreError::from_login(err))
            }
        }
    }

    /// GET a site-scoped path with the current session.
    ///
    /// Fails fast with [`CoreError::NotAuthenticated`] when there is no
    /// session. A 401 from the controller destroys the session and returns
    /// [`CoreError::SessionExpired`].
    pub async fn authenticated_get(&self, path: &str) -> Result<Value, CoreError> {
        let mut slot = self.slot.lock().await;
        let session = Arc::clone(slot.as_ref().ok_or(CoreError::NotAuthenticated)?);

        match session.client.get_site_json(path).await {
            Ok(body) => Ok(body),
            Err(unidash_api::Error::SessionExpired) => {
                warn!(session = %session.id(), "session expired");
                *slot = None;
                Err(CoreError::SessionExpired)
            }
            Err(err) if err.is_timeout() => Err(CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// End the session. The logout call is best-effort; the session is
    /// dropped whatever the controller says.
    pub async fn logout(&self) {
        let Some(session) = self.slot.lock().await.take() else {
            return;
        };
        if let Err(e) = session.client.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        }
        debug!(session = %session.id(), "logged out");
    }
}
