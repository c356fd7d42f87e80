use thiserror::Error;

/// Custom error type for database handle operations.
///
/// Every failure is surfaced as a distinguishable variant so callers can map
/// it to the appropriate response (e.g. 503 for connection failures, 500 for
/// statement failures). The handle never retries beyond the single reopen
/// attempt in [`crate::core::ConnectionHandle::reopen`] and never panics.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DbError {
    /// Malformed DSN or invalid connection settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation attempted before a successful `open`
    #[error("Connection is not open; call open() first")]
    NotOpen,

    /// Network or authentication failure opening or probing the backend
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Syntax, constraint or type error reported for a statement
    #[error("Statement error: {0}")]
    Statement(#[source] sqlx::Error),

    /// A single-row query matched zero rows
    #[error("Query returned no rows")]
    NoRows,
}

/// Result type alias for database handle operations
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Classify an error raised while opening or probing the backend.
    ///
    /// In that context every client failure is a connection-level problem
    /// (unreachable host, bad credentials, TLS failure), except malformed
    /// settings which the client reports as a configuration error.
    pub(crate) fn connecting(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(e) => DbError::Config(e.to_string()),
            other => DbError::Connection(other),
        }
    }

    /// Classify an error raised while executing a statement.
    ///
    /// Transport-level failures stay connection errors so callers can tell a
    /// dead backend apart from a bad query; everything the backend reports
    /// about the statement itself is a statement error.
    pub(crate) fn executing(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NoRows,
            sqlx::Error::Configuration(e) => DbError::Config(e.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connection(err),
            other => DbError::Statement(other),
        }
    }

    /// True when the failure indicates the backend is unreachable rather
    /// than a problem with the request itself.
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Connection(_) | DbError::NotOpen)
    }
}
