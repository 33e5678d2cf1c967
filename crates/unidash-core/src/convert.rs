// ── API-to-domain type conversions ──
//
// Bridges raw `unidash_api` records into canonical `unidash_core::model`
// types. Missing byte counters count as zero; signal values outside i32
// are dropped.

use unidash_api::StationRecord;

use crate::model::Device;

impl From<StationRecord> for Device {
    fn from(r: StationRecord) -> Self {
        Device {
            mac: r.mac,
            hostname: r.hostname,
            ip: r.ip,
            essid: r.essid,
            signal: r.signal.and_then(|s| i32::try_from(s).ok()),
            vendor: r.oui,
            rx_bytes: r.rx_bytes.unwrap_or(0),
            tx_bytes: r.tx_bytes.unwrap_or(0),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> StationRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sparse_record_takes_defaults() {
        let device = Device::from(record(json!({ "mac": "AA:BB" })));
        assert_eq!(device, Device::new("AA:BB"));
        assert_eq!(device.total_bytes(), 0);
    }

    #[test]
    fn full_record_maps_every_field() {
        let device = Device::from(record(json!({
            "mac": "aa:bb:cc:dd:ee:ff",
            "hostname": "pixel-8",
            "ip": "192.168.1.42",
            "essid": "HomeNet",
            "signal": -58,
            "oui": "Google",
            "rx_bytes": 1_000,
            "tx_bytes": 250
        })));

        assert_eq!(device.hostname.as_deref(), Some("pixel-8"));
        assert_eq!(device.ip.as_deref(), Some("192.168.1.42"));
        assert_eq!(device.essid.as_deref(), Some("HomeNet"));
        assert_eq!(device.signal, Some(-58));
        assert_eq!(device.vendor.as_deref(), Some("Google"));
        assert_eq!(device.total_bytes(), 1_250);
    }

    #[test]
    fn negative_counters_clamp_to_zero() {
        let device = Device::from(record(json!({
            "mac": "aa:bb",
            "rx_bytes": -5,
            "tx_bytes": 7
        })));
        assert_eq!(device.rx_bytes, 0);
        assert_eq!(device.tx_bytes, 7);
    }
}
