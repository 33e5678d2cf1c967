// unidash-core: Session lifecycle and client inventory pipeline between unidash-api and the dashboard.

pub mod config;
pub mod convert;
pub mod credentials;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod ranking;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use credentials::{
    CredentialError, CredentialPrompt, CredentialProvider, CredentialStore, Credentials,
    MemoryCredentialStore,
};
pub use error::CoreError;
pub use fetcher::DeviceFetcher;
pub use model::{ConnectionKind, Device};
pub use ranking::{DEFAULT_TOP_K, top_k};
pub use session::{ControllerSession, Session, SessionState};
