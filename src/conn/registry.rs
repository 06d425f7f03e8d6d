use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;

use crate::config::{ConnectionOverrides, DEFAULT_CONNECTION};
use crate::error::Result;

use super::connector::{Connector, RedisConnector};
use super::factory;
use super::handle::Handle;

/// Identity of a cached connection
///
/// Defaulting happens here, before the key is built: an absent connection name
/// becomes [`DEFAULT_CONNECTION`] and an absent database index becomes `0`, so
/// an unnamed request and an explicit `"default"` request share one cache
/// entry and one configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    name: String,
    db: i64,
}

impl ConnectionKey {
    /// Builds a key from a caller-supplied identity
    pub fn new(connection: Option<&str>, select: Option<i64>) -> Self {
        Self {
            name: connection.unwrap_or(DEFAULT_CONNECTION).to_string(),
            db: select.unwrap_or(0),
        }
    }

    /// Connection name component
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database index component
    pub fn db(&self) -> i64 {
        self.db
    }
}

impl Display for ConnectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.name, self.db)
    }
}

/// Cache of configured Redis connections, keyed by name and database index
///
/// Owned by the application's composition root and passed to consumers; a
/// fresh `Hub` per test isolates cached state. Entries are built lazily and
/// live as long as the hub — there is no eviction and no explicit close.
///
/// All mutation goes through `&mut self`, so the check-then-insert path cannot
/// race; callers that want cross-thread sharing synchronize around the whole
/// hub.
pub struct Hub<C: Connector = RedisConnector> {
    connector: C,
    connections: HashMap<ConnectionKey, Handle<C::Conn>>,
}

impl Hub<RedisConnector> {
    /// Creates an empty hub backed by the `redis` crate
    pub fn new() -> Self {
        Self::with_connector(RedisConnector)
    }
}

impl Default for Hub<RedisConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Hub<C> {
    /// Creates an empty hub backed by the given connector
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            connections: HashMap::new(),
        }
    }

    /// Returns the cached handle for an identity, connecting on first use
    ///
    /// Repeated calls with the same `(select, connection)` pair borrow the
    /// same handle; the factory runs only on a cache miss. The key is built
    /// from the requested identity before configuration resolution, so an
    /// absent `select` is cached under `0` even when the environment steers
    /// the actual connection elsewhere. Factory failures propagate unchanged
    /// and leave the cache untouched.
    pub fn instance(
        &mut self,
        select: Option<i64>,
        connection: Option<&str>,
        overrides: &ConnectionOverrides,
    ) -> Result<&mut Handle<C::Conn>> {
        let key = ConnectionKey::new(connection, select);
        match self.connections.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                tracing::debug!(key = %entry.key(), "connection cache miss");
                let handle = factory::build(&self.connector, select, connection, overrides)?;
                Ok(entry.insert(handle))
            }
        }
    }

    /// Builds a new, independently-connected handle, bypassing the cache
    pub fn factory(
        &self,
        select: Option<i64>,
        connection: Option<&str>,
        overrides: &ConnectionOverrides,
    ) -> Result<Handle<C::Conn>> {
        factory::build(&self.connector, select, connection, overrides)
    }

    /// Number of cached connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the cache holds no connections
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Whether a connection is cached for the given identity
    pub fn contains(&self, select: Option<i64>, connection: Option<&str>) -> bool {
        self.connections
            .contains_key(&ConnectionKey::new(connection, select))
    }
}
