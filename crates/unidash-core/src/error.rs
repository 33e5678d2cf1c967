// ── Core error types ──
//
// Domain errors from unidash-core. Consumers see "login cancelled",
// "session expired", "fetch failed", never raw reqwest or serde errors.
// The `From<unidash_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

use crate::credentials::CredentialError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Login cancelled")]
    LoginCancelled,

    /// Login rejected (`status` set) or the login endpoint was unreachable
    /// (`status` is `None`).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        message: String,
        status: Option<u16>,
    },

    #[error("Not authenticated -- log in first")]
    NotAuthenticated,

    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Network ──────────────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Fetch failed: {message}")]
    FetchFailed {
        /// HTTP status, when the controller answered with one.
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed controller response: {message}")]
    MalformedResponse { message: String },

    // ── Local ────────────────────────────────────────────────────────
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Authentication-class failures: the caller may re-prompt and log in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::LoginCancelled
                | Self::AuthenticationFailed { .. }
                | Self::NotAuthenticated
                | Self::SessionExpired
        )
    }

    /// Login was answered by the controller with a rejection (as opposed
    /// to cancelled or unreachable).
    pub fn is_rejected_login(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { status: Some(_), .. })
    }

    /// Translate a failed login attempt. Every failure, including an
    /// unreachable endpoint, is an authentication failure at this stage.
    pub(crate) fn from_login(err: unidash_api::Error) -> Self {
        match err {
            unidash_api::Error::Authentication { status, message } => {
                Self::AuthenticationFailed { message, status }
            }
            other if other.is_transport() => Self::AuthenticationFailed {
                message: format!("controller unreachable: {other}"),
                status: None,
            },
            other => Self::AuthenticationFailed {
                message: format!("login failed: {other}"),
                status: None,
            },
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unidash_api::Error> for CoreError {
    fn from(err: unidash_api::Error) -> Self {
        match err {
            unidash_api::Error::Authentication { status, message } => {
                CoreError::AuthenticationFailed { message, status }
            }
            unidash_api::Error::SessionExpired => CoreError::SessionExpired,
            unidash_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if let Some(status) = e.status() {
                    CoreError::FetchFailed {
                        status: Some(status.as_u16()),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            unidash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            unidash_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            unidash_api::Error::Status { status, message } => CoreError::FetchFailed {
                status: Some(status),
                message: format!("HTTP {status}: {message}"),
            },
            unidash_api::Error::Api { message } => CoreError::FetchFailed {
                status: None,
                message,
            },
            unidash_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_fetch_failed() {
        let err = CoreError::from(unidash_api::Error::Status {
            status: 502,
            message: "bad gateway".into(),
        });
        assert!(matches!(err, CoreError::FetchFailed { status: Some(502), .. }));
        assert!(!err.is_auth_error());
    }

    #[test]
    fn login_failures_are_auth_errors() {
        let rejected = CoreError::from_login(unidash_api::Error::Authentication {
            status: Some(400),
            message: "nope".into(),
        });
        assert!(rejected.is_auth_error());
        assert!(rejected.is_rejected_login());

        let unreachable = CoreError::from_login(unidash_api::Error::Tls("handshake".into()));
        assert!(unreachable.is_auth_error());
        assert!(!unreachable.is_rejected_login());
        assert!(unreachable.to_string().contains("controller unreachable"));
    }

    #[test]
    fn non_transport_login_failure_is_not_called_unreachable() {
        let err = CoreError::from_login(unidash_api::Error::Api {
            message: "api.err.Invalid".into(),
        });
        assert!(!err.is_rejected_login());
        let text = err.to_string();
        assert!(text.contains("login failed"), "got {text}");
        assert!(!text.contains("unreachable"));
    }

    #[test]
    fn cancellation_is_not_a_rejection() {
        assert!(CoreError::LoginCancelled.is_auth_error());
        assert!(!CoreError::LoginCancelled.is_rejected_login());
    }
}
