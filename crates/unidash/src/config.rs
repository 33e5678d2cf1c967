//! CLI-side config resolution: file + env via `unidash_config`, then
//! command-line overrides, then the session wiring.
//!
//! Core never sees `GlobalOpts`; it receives a finished `ControllerConfig`
//! and a `CredentialProvider`.

use std::sync::Arc;

use unidash_config::{Config, KeyringStore};
use unidash_core::{ControllerSession, CredentialProvider};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::prompt::TerminalPrompt;

/// Load the config file (or defaults) and apply CLI flag overrides.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = unidash_config::load_config(global.config.as_deref())?;

    if let Some(ref controller) = global.controller {
        cfg.controller.clone_from(controller);
    }
    if let Some(ref site) = global.site {
        cfg.site.clone_from(site);
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }

    Ok(cfg)
}

/// Credential provider over the OS keyring with a terminal prompt.
pub fn credential_provider(cfg: &Config) -> CredentialProvider {
    CredentialProvider::new(
        cfg.service.clone(),
        Arc::new(KeyringStore::new()),
        Box::new(TerminalPrompt),
    )
}

/// Validate the config and build an unauthenticated session.
pub fn build_session(cfg: &Config) -> Result<ControllerSession, CliError> {
    let controller = cfg.to_controller_config()?;
    Ok(ControllerSession::new(controller, credential_provider(cfg)))
}
