// unidash-api: Async client for the UniFi controller's session and inventory endpoints

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ControllerClient;
pub use error::Error;
pub use models::{Meta, StationEnvelope, StationRecord};
pub use transport::{TlsMode, TransportConfig};
