use super::connector::{RawConnection, RedisConnection};

/// A configured, connected Redis client handle
///
/// Handles are move-only: a cached handle is borrowed out of the
/// [`Hub`](super::registry::Hub) exclusively, and a factory handle is owned by
/// its caller. There is deliberately no `Clone`.
pub struct Handle<C: RawConnection = RedisConnection> {
    conn: C,
    name: String,
    db: i64,
    prefix: String,
}

impl<C: RawConnection> std::fmt::Debug for Handle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.name)
            .field("db", &self.db)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<C: RawConnection> Handle<C> {
    pub(crate) fn new(conn: C, name: &str, db: i64, prefix: String) -> Self {
        Self {
            conn,
            name: name.to_string(),
            db,
            prefix,
        }
    }

    /// Name of the connection configuration this handle was built from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database index the connection is switched to
    pub fn db(&self) -> i64 {
        self.db
    }

    /// Key prefix applied to keys composed through this handle
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Applies the handle's key prefix to a key
    pub fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Underlying connection, for issuing data commands
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }
}
