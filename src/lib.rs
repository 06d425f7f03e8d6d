//! # redis-hub
//!
//! A process-wide cache of configured Redis connections, keyed by logical
//! connection name and database index, plus a deterministic key-naming helper.
//!
//! Connections are built lazily: the first request for a `(connection, db)`
//! identity resolves its configuration (caller overrides, then
//! `REDIS_<NAME>_<FIELD>` environment variables, then defaults), runs the
//! connect/auth/select sequence and caches the handle. Later requests with the
//! same identity borrow the same handle. [`Hub::factory`] bypasses the cache
//! when an independent connection is needed.
//!
//! The hub is plain owned state: construct it in your composition root and
//! pass it down. Handles are move-only and are never cloned.
//!
//! ## Example
//!
//! ```no_run
//! use redis_hub::{ConnectionOverrides, Hub};
//!
//! fn main() -> redis_hub::Result<()> {
//!     let mut hub = Hub::new();
//!
//!     // Cached: connects on first use, later calls reuse the handle.
//!     let handle = hub.instance(Some(1), Some("sessions"), &ConnectionOverrides::new())?;
//!     let counter = handle.prefixed(&redis_hub::key!("visits", "daily"));
//!
//!     // Fresh connection with caller overrides; the cache is untouched.
//!     let overrides = ConnectionOverrides::new().timeout(30.0).persistent(true);
//!     let _worker = hub.factory(Some(1), Some("queue"), &overrides)?;
//!     Ok(())
//! }
//! ```

mod config;
mod conn;
mod error;
mod key;
mod macros;

pub use config::{ConnectionConfig, ConnectionOverrides, DEFAULT_CONNECTION};
pub use conn::{
    ConnectionKey, Connector, Handle, Hub, RawConnection, RedisConnection, RedisConnector,
};
pub use error::{Error, Result};
pub use key::key;
