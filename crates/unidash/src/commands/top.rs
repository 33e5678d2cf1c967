//! `unidash top`: clients ranked by combined download + upload volume.

use tabled::Tabled;

use unidash_config::Config;
use unidash_core::{ControllerSession, Device, DeviceFetcher, top_k};

use crate::cli::{GlobalOpts, TopArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "Device")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Connection")]
    connection: String,
    #[tabled(rename = "Downloaded")]
    downloaded: String,
    #[tabled(rename = "Uploaded")]
    uploaded: String,
}

impl From<&Device> for TopRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.display_name().to_owned(),
            ip: output::or_na(d.ip.as_deref()),
            ssid: d.essid.clone().unwrap_or_else(|| "Wired".into()),
            connection: d.connection().to_string(),
            downloaded: output::megabytes(d.rx_bytes),
            uploaded: output::megabytes(d.tx_bytes),
        }
    }
}

pub async fn handle(
    session: &ControllerSession,
    args: TopArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    super::connect(session, global).await?;

    let devices = DeviceFetcher::new(session).fetch().await?;
    let ranked = top_k(&devices, args.count.unwrap_or(cfg.top));

    let out = output::render_list(&global.output, &ranked, |d| TopRow::from(d), |d| d.mac.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
