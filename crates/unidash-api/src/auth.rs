// Session authentication
//
// Cookie-based login/logout against a standalone Network Application.
// The login endpoint sets a session cookie in the client's jar;
// subsequent requests carry it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ControllerClient;
use crate::error::{Error, preview};

/// Controller-level login path (`POST {base}/api/login`).
pub const LOGIN_PATH: &str = "login";

/// Controller-level logout path (`POST {base}/api/logout`).
pub const LOGOUT_PATH: &str = "logout";

impl ControllerClient {
    /// Authenticate with the controller using username/password.
    ///
    /// Sends a single `POST /api/login` with `{username, password}`. Only
    /// HTTP 200 counts as success; the body of a rejection is kept for the
    /// error message but not interpreted.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url(LOGIN_PATH)?;

        debug!(username, "logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                status: Some(status.as_u16()),
                message: format!("login failed (HTTP {status}): {}", preview(&body)),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session (`POST /api/logout`).
    ///
    /// Any HTTP response counts as logged out; only transport failures
    /// are reported.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url(LOGOUT_PATH)?;

        debug!("logging out at {}", url);

        let _resp = self
            .http()
            .post(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        debug!("logout complete");
        Ok(())
    }
}
