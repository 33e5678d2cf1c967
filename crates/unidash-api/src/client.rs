// Controller HTTP client
//
// Wraps `reqwest::Client` with site-scoped URL construction and response
// classification. Login/logout live in `auth.rs`; this module only knows
// how to reach the controller and how to read what comes back.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, preview};
use crate::transport::TransportConfig;

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}` with HTTP 200.
#[derive(serde::Deserialize)]
struct UnifiOsError {
    error: Option<UnifiOsErrorInner>,
}

#[derive(serde::Deserialize)]
struct UnifiOsErrorInner {
    code: u16,
    message: Option<String>,
}

/// Raw HTTP client bound to one controller endpoint and one site.
///
/// Each client owns its own cookie jar, so dropping the client drops the
/// session cookie with it.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
    site: String,
    cookie_jar: Option<Arc<Jar>>,
}

impl ControllerClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// (session auth requires cookies). `base_url` is the controller root,
    /// e.g. `https://192.168.1.1:8443`.
    pub fn new(base_url: Url, site: String, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            site,
            cookie_jar,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, site: String) -> Self {
        Self {
            http,
            base_url,
            site,
            cookie_jar: None,
        }
    }

    /// The site identifier requests are scoped to.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the cookie jar currently holds a cookie for the controller.
    pub fn has_session_cookie(&self) -> bool {
        self.cookie_jar
            .as_ref()
            .and_then(|jar| jar.cookies(&self.base_url))
            .is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a controller-level URL: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    /// Build a site-scoped URL: `{base}/api/s/{site}/{path}`.
    pub fn site_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/api/s/{}/{path}", self.site))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a site-scoped path and return the decoded JSON body.
    ///
    /// The body is returned as-is; envelope interpretation is left to the
    /// caller.
    pub async fn get_site_json(&self, path: &str) -> Result<Value, Error> {
        let url = self.site_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::read_json(resp).await
    }

    /// Classify a response: 401 is session expiry, other non-success codes
    /// are status errors, and 200 bodies are checked for the UniFi OS
    /// error shape before decoding.
    async fn read_json(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if let Ok(UnifiOsError { error: Some(err) }) = serde_json::from_str::<UnifiOsError>(&body)
        {
            let msg = err.message.unwrap_or_default();
            return Err(if err.code == 401 {
                Error::SessionExpired
            } else {
                Error::Api {
                    message: format!("UniFi OS error {}: {msg}", err.code),
                }
            });
        }

        serde_json::from_str::<Value>(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}
