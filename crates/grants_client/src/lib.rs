//! Grants client: HTTP access to the grant tracker backend and effect execution.
mod api;
mod engine;
mod filename;
mod persist;
mod types;
pub mod workflow;

pub use api::{ApiSettings, GrantsApi, ReqwestApi};
pub use engine::{ApiCommand, ApiEvent, ClientConfig, ClientEvents, ClientHandle, Ticket};
pub use filename::download_filename;
pub use persist::{ensure_download_dir, DownloadWriter, PersistError};
pub use types::{ApiError, FailureKind, StartupError};
