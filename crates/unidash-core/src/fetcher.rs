// ── Client inventory fetch ──
//
// Pulls `stat/sta` through the authenticated session and normalizes each
// record into a `Device`. Bad records are dropped one at a time; only a
// failed request or an unreadable envelope fails the whole fetch.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use unidash_api::{StationEnvelope, StationRecord};

use crate::error::CoreError;
use crate::model::Device;
use crate::session::ControllerSession;

/// Site-scoped path of the connected-client list.
pub const STATIONS_PATH: &str = "stat/sta";

/// Fetches the connected-client inventory for the session's site.
pub struct DeviceFetcher<'a> {
    session: &'a ControllerSession,
}

impl<'a> DeviceFetcher<'a> {
    pub fn new(session: &'a ControllerSession) -> Self {
        Self { session }
    }

    /// Fetch a fresh device list.
    ///
    /// Logs in first if needed. An expired session is re-established once
    /// and the request retried once; every other failure is returned as-is.
    pub async fn fetch(&self) -> Result<Vec<Device>, CoreError> {
        self.session.login(false).await?;

        let body = match self.session.authenticated_get(STATIONS_PATH).await {
            Err(CoreError::SessionExpired) => {
                info!("re-authenticating after session expiry");
                self.session.login(false).await?;
                self.session.authenticated_get(STATIONS_PATH).await?
            }
            other => other?,
        };

        parse_devices(body)
    }
}

/// Decode a `stat/sta` body into devices, skipping records without a
/// string `mac` and records repeating an earlier `mac` (compared
/// case-insensitively).
pub fn parse_devices(body: Value) -> Result<Vec<Device>, CoreError> {
    let envelope: StationEnvelope =
        serde_json::from_value(body).map_err(|e| CoreError::MalformedResponse {
            message: format!("expected an object with a `data` array: {e}"),
        })?;

    if let Some(meta) = envelope.meta.as_ref().filter(|m| !m.is_ok()) {
        return Err(CoreError::FetchFailed {
            status: None,
            message: meta
                .msg
                .clone()
                .unwrap_or_else(|| format!("rc={}", meta.rc)),
        });
    }

    let received = envelope.data.len();
    let mut seen = HashSet::with_capacity(received);
    let mut devices = Vec::with_capacity(received);

    for (index, raw) in envelope.data.into_iter().enumerate() {
        let record = match serde_json::from_value::<StationRecord>(raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed client record");
                continue;
            }
        };
        if !seen.insert(record.mac.to_ascii_lowercase()) {
            warn!(index, mac = %record.mac, "skipping duplicate client record");
            continue;
        }
        devices.push(Device::from(record));
    }

    debug!(received, kept = devices.len(), "client list parsed");
    Ok(devices)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn record_without_mac_is_skipped() {
        let devices = parse_devices(json!({
            "meta": { "rc": "ok" },
            "data": [
                { "mac": "aa:aa", "hostname": "one" },
                { "hostname": "no-mac" },
                { "mac": "bb:bb" }
            ]
        }))
        .unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].mac, "aa:aa");
        assert_eq!(devices[1].mac, "bb:bb");
    }

    #[test]
    fn non_object_and_non_string_mac_are_skipped() {
        let devices = parse_devices(json!({
            "data": [ 42, { "mac": 7 }, { "mac": "cc:cc" } ]
        }))
        .unwrap();
        assert_eq!(devices.len(), 1);
    }

    #[test]
    fn duplicate_mac_keeps_first() {
        let devices = parse_devices(json!({
            "data": [
                { "mac": "aa:aa", "rx_bytes": 1 },
                { "mac": "aa:aa", "rx_bytes": 2 }
            ]
        }))
        .unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].rx_bytes, 1);
    }

    #[test]
    fn duplicate_mac_ignores_case() {
        let devices = parse_devices(json!({
            "data": [ { "mac": "AA:BB" }, { "mac": "aa:bb" }, { "mac": "aa:cc" } ]
        }))
        .unwrap();
        let macs: Vec<_> = devices.iter().map(|d| d.mac.as_str()).collect();
        assert_eq!(macs, ["AA:BB", "aa:cc"]);
    }

    #[test]
    fn bad_optional_fields_keep_the_device() {
        let devices = parse_devices(json!({
            "data": [
                { "mac": "aa:01", "hostname": 42 },
                { "mac": "aa:02", "rx_bytes": "1000" },
                { "mac": "aa:03", "signal": "-60" },
                { "mac": "aa:04", "rx_bytes": 18_446_744_073_709_551_615_u64 }
            ]
        }))
        .unwrap();

        let kept: Vec<_> = devices.iter().map(|d| (d.mac.as_str(), d.rx_bytes)).collect();
        assert_eq!(
            kept,
            [("aa:01", 0), ("aa:02", 1000), ("aa:03", 0), ("aa:04", u64::MAX)]
        );
        assert_eq!(devices[0].hostname, None);
        assert_eq!(devices[2].signal, Some(-60));
    }

    #[test]
    fn missing_data_is_malformed() {
        let err = parse_devices(json!({ "meta": { "rc": "ok" } })).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }), "got {err:?}");
    }

    #[test]
    fn envelope_error_is_fetch_failure() {
        let err = parse_devices(json!({
            "meta": { "rc": "error", "msg": "api.err.NoSiteContext" },
            "data": []
        }))
        .unwrap_err();

        match err {
            CoreError::FetchFailed { status, message } => {
                assert_eq!(status, None);
                assert_eq!(message, "api.err.NoSiteContext");
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_fine() {
        assert!(parse_devices(json!({ "data": [] })).unwrap().is_empty());
    }
}
