// ── Device domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a client reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Wired,
    Wireless,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wired => f.write_str("Wired"),
            Self::Wireless => f.write_str("Wireless"),
        }
    }
}

/// One connected client from a single inventory fetch.
///
/// `mac` is unique within a fetch; there is no identity across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub mac: String,
    pub hostname: Option<String>,
    pub ip: Option<String>,
    /// SSID the client is associated with. Present only for wireless clients.
    pub essid: Option<String>,
    /// Signal strength in dBm.
    pub signal: Option<i32>,
    /// Vendor from the MAC OUI lookup.
    pub vendor: Option<String>,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl Device {
    /// Device with only a MAC; every other field at its default.
    pub fn new(mac: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            hostname: None,
            ip: None,
            essid: None,
            signal: None,
            vendor: None,
            rx_bytes: 0,
            tx_bytes: 0,
        }
    }

    /// Combined received + transmitted volume.
    pub fn total_bytes(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }

    pub fn connection(&self) -> ConnectionKind {
        if self.essid.is_some() {
            ConnectionKind::Wireless
        } else {
            ConnectionKind::Wired
        }
    }

    pub fn is_wireless(&self) -> bool {
        self.connection() == ConnectionKind::Wireless
    }

    /// Hostname, or `"Unknown"` when the controller has none.
    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or("Unknown")
    }
}
