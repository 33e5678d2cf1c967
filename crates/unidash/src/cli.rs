//! Clap derive structures for the `unidash` CLI.
//!
//! Kept free of crate-internal imports: `build.rs` compiles this file on
//! its own to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unidash -- connected clients and bandwidth hogs on your UniFi network
#[derive(Debug, Parser)]
#[command(
    name = "unidash",
    version,
    about = "UniFi network dashboard: connected clients and top bandwidth consumers",
    long_about = "Logs in to a UniFi Network controller, lists connected clients,\n\
        and ranks them by combined download + upload volume.\n\n\
        Credentials are kept in the system keyring after the first login.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file
    #[arg(long, env = "UNIDASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Controller URL (overrides config)
    #[arg(long, short = 'c', global = true)]
    pub controller: Option<String>,

    /// Site name (overrides config)
    #[arg(long, short = 's', global = true)]
    pub site: Option<String>,

    /// Accept self-signed TLS certificates (disables verification)
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "UNIDASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one MAC per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every connected client
    #[command(alias = "ls", alias = "d")]
    Devices,

    /// Show the clients using the most bandwidth
    #[command(alias = "live")]
    Top(TopArgs),

    /// Log in and report the connection status
    Login,

    /// Manage the stored controller credentials
    #[command(alias = "creds")]
    Credentials(CredentialsArgs),

    /// Inspect and create configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Top ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Number of clients to show (defaults to the config value, 5)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

// ── Credentials ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CredentialsCommand {
    /// Prompt for a username and password and store them
    Set,
    /// Remove the stored username and password
    Forget,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
