//! `unidash devices`: every connected client.

use tabled::Tabled;

use unidash_core::{ControllerSession, Device, DeviceFetcher};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Connected to")]
    network: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Type")]
    vendor: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.display_name().to_owned(),
            mac: d.mac.clone(),
            ip: output::or_na(d.ip.as_deref()),
            network: d.essid.clone().unwrap_or_else(|| "Wired".into()),
            signal: output::signal(d.signal),
            vendor: d.vendor.clone().unwrap_or_else(|| "Unknown".into()),
        }
    }
}

pub async fn handle(session: &ControllerSession, global: &GlobalOpts) -> Result<(), CliError> {
    super::connect(session, global).await?;

    let devices = DeviceFetcher::new(session).fetch().await?;
    let out = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| d.mac.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
