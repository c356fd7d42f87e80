use async_trait::async_trait;

use crate::core::error::DbResult;

/// Database defines the port (interface) the HTTP layer uses to reach the
/// backend: make sure the handle is live, then run work on it. Keeping the
/// boundary this narrow lets handler tests substitute a mock and keeps the
/// self-healing logic inside the core.
#[async_trait]
pub trait Database: Send + Sync + 'static {
    /// Ensure the underlying connection is usable, transparently
    /// re-establishing it if it has been dropped.
    async fn ready(&self) -> DbResult<()>;

    /// Report the backend engine version string.
    ///
    /// Implementations perform the liveness-gated reopen before querying,
    /// so any request can recover from a dropped connection without
    /// caller-visible special-casing.
    async fn engine_version(&self) -> DbResult<String>;
}
