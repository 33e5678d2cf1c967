//! Command dispatch: routes parsed CLI commands to their handlers.

pub mod config_cmd;
pub mod credentials;
pub mod devices;
pub mod login;
pub mod top;

use std::io::IsTerminal;

use tracing::{debug, warn};

use unidash_config::Config;
use unidash_core::ControllerSession;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a command that needs a controller session.
pub async fn dispatch(
    cmd: Command,
    session: &ControllerSession,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices => devices::handle(session, global).await,
        Command::Top(args) => top::handle(session, args, cfg, global).await,
        Command::Login => login::handle(session, global).await,
        // Handled before a session is built
        Command::Credentials(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Log in, offering once to re-enter credentials when the controller
/// rejects the stored ones.
pub async fn connect(session: &ControllerSession, global: &GlobalOpts) -> Result<(), CliError> {
    match session.login(false).await {
        Ok(_) => {}
        Err(e) if e.is_rejected_login() && std::io::stdin().is_terminal() => {
            warn!(error = %e, "controller rejected the credentials");
            if !confirm("Login failed. Enter new credentials?")? {
                return Err(e.into());
            }
            session.credentials().forget()?;
            session.login(true).await?;
        }
        Err(e) => return Err(e.into()),
    }

    debug!(url = %session.config().url, "session established");
    output::status(
        &format!("Connected to UniFi at {}", session.config().url),
        &global.color,
        global.quiet,
    );
    Ok(())
}

fn confirm(message: &str) -> Result<bool, CliError> {
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
