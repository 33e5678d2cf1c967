//! `unidash credentials`: manage the keyring entries directly.

use tracing::info;

use unidash_config::Config;

use crate::cli::{CredentialsArgs, CredentialsCommand, GlobalOpts};
use crate::config::credential_provider;
use crate::error::CliError;
use crate::output;

pub fn handle(args: CredentialsArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let provider = credential_provider(cfg);

    match args.command {
        CredentialsCommand::Set => {
            let credentials = provider.replace()?;
            info!(service = provider.service(), "credentials replaced");
            output::status(
                &format!("Stored credentials for {}", credentials.username()),
                &global.color,
                global.quiet,
            );
        }
        CredentialsCommand::Forget => {
            provider.forget()?;
            output::status(
                &format!("Removed stored credentials ({})", provider.service()),
                &global.color,
                global.quiet,
            );
        }
    }
    Ok(())
}
