//! Sinew - a resilient database handle with an HTTP service wrapped around it.
//!
//! Sinew is a small **hexagonal architecture** service whose core is a
//! self-healing database connection handle. The handle owns a connection
//! pool, remembers when it last verified the connection, and transparently
//! re-establishes it when a check fails, so callers never juggle "is the
//! database still there" state themselves.
//!
//! # Features
//! - A [`ConnectionHandle`] over Postgres, MySQL or SQLite (picked by config)
//! - Cached liveness probes: `ping` hits the network at most once per
//!   configured window, `reopen` self-heals a dead or never-opened handle
//! - Statement execution (`exec`, `query`, `query_row`) with a clear
//!   connection-vs-statement error split
//! - An Axum HTTP service exposing health, greeting and database-version
//!   endpoints, plus an admin-gated index route
//! - Multi-format configuration (TOML/YAML/JSON) with environment overrides
//! - Structured JSON logging via `tracing` and graceful shutdown
//!
//! # Quick Example
//! ```no_run
//! use sinew::{ConnectionHandle, config::DatabaseConfig};
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let cfg = DatabaseConfig {
//!     driver: "sqlite".into(),
//!     name: "app.db".into(),
//!     ..DatabaseConfig::default()
//! };
//! let db = ConnectionHandle::new(cfg);
//! db.reopen().await?;
//! println!("engine: {}", db.version().await?);
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits) from **adapters** (implementations)
//! while keeping business logic inside `core`. HTTP handlers depend only on
//! the [`Database`] port, so tests swap the real handle for a mock.
//!
//! # Error Handling
//! The core returns the domain error [`DbError`]; the binary edge uses
//! `eyre::Result` with context attached via `WrapErr`.
pub mod config;
pub mod ports;
pub mod tracing_setup;
pub mod utils;

pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::router,
    config::{AppConfig, DatabaseConfig},
    core::{ConnectionHandle, DbError, DbResult, HandleStatus},
    ports::Database,
    utils::GracefulShutdown,
};
