//! Output formatting: table, JSON, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Placeholder for fields the controller did not report.
pub const NOT_AVAILABLE: &str = "N/A";

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Print a one-line status message to stderr, e.g. the connection banner.
pub fn status(message: &str, color: &ColorMode, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    if should_color(color) {
        let _ = writeln!(stderr, "{} {}", "✓".green(), message.bold());
    } else {
        let _ = writeln!(stderr, "{message}");
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Field formatters ─────────────────────────────────────────────────

/// Byte count as decimal megabytes with two decimals: `1500000` → `"1.50 MB"`.
pub fn megabytes(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mb = bytes as f64 / 1_000_000.0;
    format!("{mb:.2} MB")
}

/// Signal strength in dBm, or `N/A` when not reported.
pub fn signal(dbm: Option<i32>) -> String {
    dbm.map_or_else(|| NOT_AVAILABLE.into(), |s| format!("{s} dBm"))
}

/// Optional string field, or `N/A` when absent.
pub fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_use_decimal_units() {
        assert_eq!(megabytes(0), "0.00 MB");
        assert_eq!(megabytes(1_500_000), "1.50 MB");
        assert_eq!(megabytes(123_456_789), "123.46 MB");
    }

    #[test]
    fn missing_fields_render_as_na() {
        assert_eq!(signal(None), "N/A");
        assert_eq!(signal(Some(-61)), "-61 dBm");
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("10.0.0.2")), "10.0.0.2");
    }
}
