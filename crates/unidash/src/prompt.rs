//! Terminal implementation of `CredentialPrompt`.

use dialoguer::Input;
use secrecy::SecretString;

use unidash_core::{CredentialError, CredentialPrompt};

/// Reads the username with `dialoguer` and the password without echo.
/// An empty answer or Ctrl-C counts as cancelling.
pub struct TerminalPrompt;

fn prompt_err(e: impl std::fmt::Display) -> CredentialError {
    CredentialError::Prompt {
        message: format!("prompt failed: {e}"),
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn prompt_username(&self) -> Result<Option<String>, CredentialError> {
        let result = Input::<String>::new()
            .with_prompt("UniFi username")
            .allow_empty(true)
            .interact_text();

        match result {
            Ok(name) if name.trim().is_empty() => Ok(None),
            Ok(name) => Ok(Some(name.trim().to_owned())),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                Ok(None)
            }
            Err(e) => Err(prompt_err(e)),
        }
    }

    fn prompt_password(&self, username: &str) -> Result<Option<SecretString>, CredentialError> {
        match rpassword::prompt_password(format!("Password for {username}: ")) {
            Ok(pass) if pass.is_empty() => Ok(None),
            Ok(pass) => Ok(Some(SecretString::from(pass))),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(prompt_err(e)),
        }
    }
}
