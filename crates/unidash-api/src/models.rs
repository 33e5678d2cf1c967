// Controller response types
//
// The inventory endpoint wraps its payload in `{ meta, data }`. Records are
// kept as raw JSON until the caller decides how to treat each one, so a
// single bad record never poisons the whole list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

/// Inventory response envelope.
///
/// ```json
/// { "meta": { "rc": "ok" }, "data": [ { "mac": "..." }, ... ] }
/// ```
///
/// `meta` is optional: some controllers and proxies return only `data`.
#[derive(Debug, Deserialize)]
pub struct StationEnvelope {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: Vec<serde_json::Value>,
}

/// Metadata from the envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl Meta {
    pub fn is_ok(&self) -> bool {
        self.rc == "ok"
    }
}

// ── Client (Station) ─────────────────────────────────────────────────

/// One connected client from `stat/sta`.
///
/// Only `mac` is required. Every other field is decoded leniently: a value
/// of the wrong type reads as absent instead of failing the record.
/// Numeric fields accept integers, floats, or numeric strings since
/// firmware versions disagree on the encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub mac: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub essid: Option<String>,
    #[serde(default, deserialize_with = "lenient_signal")]
    pub signal: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub oui: Option<String>,
    /// Negative counters read as 0.
    #[serde(default, deserialize_with = "lenient_counter")]
    pub rx_bytes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub tx_bytes: Option<u64>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
fn lenient_signal<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn lenient_counter<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 })),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<i64>().ok().map(|_| 0))
        }
        _ => None,
    })
}
