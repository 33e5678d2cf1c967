// ── Bandwidth ranking ──

use std::cmp::Reverse;

use crate::model::Device;

/// Number of devices the live view shows.
pub const DEFAULT_TOP_K: usize = 5;

/// The `k` devices with the highest `rx_bytes + tx_bytes`, largest first.
///
/// The sort is stable, so devices with equal totals keep their input
/// order. The input slice is left untouched.
pub fn top_k(devices: &[Device], k: usize) -> Vec<Device> {
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&Device> = devices.iter().collect();
    ranked.sort_by_key(|d| Reverse(d.total_bytes()));
    ranked.into_iter().take(k).cloned().collect()
}
