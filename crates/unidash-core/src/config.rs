// ── Runtime connection configuration ──
//
// Describes *how* to reach the controller. Never touches disk; the
// dashboard builds a `ControllerConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use unidash_api::{TlsMode, TransportConfig};

/// Keyring service identifier credentials are stored under.
pub const DEFAULT_CREDENTIAL_SERVICE: &str = "UniFiDashboard";

/// Site queried when none is configured.
pub const DEFAULT_SITE: &str = "default";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled root store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Must be requested explicitly.
    DangerAcceptInvalid,
}

impl TlsVerification {
    pub fn is_insecure(&self) -> bool {
        matches!(self, Self::DangerAcceptInvalid)
    }
}

/// Configuration for the single controller this process talks to.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://192.168.1.1:8443`).
    pub url: Url,
    /// Site whose client inventory is queried.
    pub site: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Service name for the credential store.
    pub credential_service: String,
}

impl ControllerConfig {
    /// Config for `url` with the hardened defaults: default site,
    /// certificate verification on, 10 second timeout.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            site: DEFAULT_SITE.into(),
            tls: TlsVerification::default(),
            timeout: unidash_api::transport::DEFAULT_TIMEOUT,
            credential_service: DEFAULT_CREDENTIAL_SERVICE.into(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
    }
}
