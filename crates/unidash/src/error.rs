//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use unidash_config::ConfigError;
use unidash_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(unidash::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try: unidash devices --insecure"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(unidash::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(unidash::auth_failed),
        help(
            "Verify the username and password for the controller.\n\
             Re-enter them with: unidash credentials set"
        )
    )]
    AuthFailed { message: String },

    #[error("Login cancelled")]
    #[diagnostic(code(unidash::login_cancelled))]
    LoginCancelled,

    #[error("Credential storage failed: {message}")]
    #[diagnostic(
        code(unidash::credentials),
        help("The system keyring may be locked or unavailable.")
    )]
    Credentials { message: String },

    // ── Controller data ──────────────────────────────────────────────
    #[error("Could not fetch clients: {message}")]
    #[diagnostic(code(unidash::fetch_failed))]
    FetchFailed { message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(unidash::malformed_response),
        help("The controller answered with data unidash does not understand. Run with -vv for details.")
    )]
    MalformedResponse { message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unidash::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(unidash::config),
        help("Check the config file (unidash config path) or create one with: unidash config init")
    )]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(unidash::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::LoginCancelled => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LoginCancelled => Self::LoginCancelled,
            CoreError::AuthenticationFailed { message, .. } => Self::AuthFailed { message },
            CoreError::NotAuthenticated => Self::AuthFailed {
                message: "not logged in".into(),
            },
            CoreError::SessionExpired => Self::AuthFailed {
                message: "session expired".into(),
            },
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::FetchFailed { message, .. } => Self::FetchFailed { message },
            CoreError::MalformedResponse { message } => Self::MalformedResponse { message },
            CoreError::Credentials(e) => Self::Credentials {
                message: e.to_string(),
            },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
