// ── Domain model ──
//
// Entities the dashboard renders. Built fresh from each fetch and free of
// any transport or presentation types.

pub mod device;

pub use device::{ConnectionKind, Device};
