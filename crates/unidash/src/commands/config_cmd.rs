//! Config subcommand handlers. None of these touch the controller.

use dialoguer::{Confirm, Input};

use unidash_config::{Config, config_path, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{credential_provider, effective_config};
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = effective_config(global)?;
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Config {
                        message: format!("failed to render config: {e}"),
                    })?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let path = global.config.clone().unwrap_or_else(config_path);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}

/// Interactive wizard: controller, site, TLS, then optionally credentials.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let current = effective_config(global)?;
    let target = global.config.clone().unwrap_or_else(config_path);
    eprintln!("unidash configuration wizard");
    eprintln!("   Config path: {}\n", target.display());

    let controller: String = Input::new()
        .with_prompt("Controller URL")
        .default(current.controller.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let site: String = Input::new()
        .with_prompt("Site name")
        .default(current.site.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let insecure = Confirm::new()
        .with_prompt("Accept self-signed certificates?")
        .default(current.insecure)
        .interact()
        .map_err(prompt_err)?;

    let cfg = Config {
        controller,
        site,
        insecure,
        ..current
    };
    // Fail before writing anything the session could not use.
    cfg.to_controller_config()?;

    let path = save_config(&cfg, Some(&target))?;
    eprintln!("\n✓ Configuration written to {}", path.display());

    let store_now = Confirm::new()
        .with_prompt("Store controller credentials in the system keyring now?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;
    if store_now {
        let credentials = credential_provider(&cfg).replace()?;
        eprintln!("   ✓ Credentials for {} stored", credentials.username());
    }

    eprintln!("\n  Test it: unidash login");
    Ok(())
}
