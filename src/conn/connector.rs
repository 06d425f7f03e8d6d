use std::time::Duration;

use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult};

#[cfg(test)]
use mockall::automock;

/// Operations driven on a freshly established connection
#[cfg_attr(test, automock)]
pub trait RawConnection {
    /// Authenticates the connection (AUTH)
    fn auth(&mut self, password: &str) -> RedisResult<()>;

    /// Switches the connection to the given database index (SELECT)
    fn select(&mut self, db: i64) -> RedisResult<()>;
}

/// Establishes connections through the underlying Redis client library
#[cfg_attr(test, automock(type Conn = MockRawConnection;))]
pub trait Connector {
    /// Connection type produced by this connector
    type Conn: RawConnection;

    /// Opens a standard connection to `host:port`
    ///
    /// `timeout` bounds connection establishment; `None` blocks indefinitely.
    fn connect(&self, host: &str, port: u16, timeout: Option<Duration>)
        -> RedisResult<Self::Conn>;

    /// Opens a persistent connection tagged with `id`
    ///
    /// Transport-level reuse of tagged connections is the client library's
    /// concern, independent of the connection cache.
    fn connect_persistent(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
        id: &str,
    ) -> RedisResult<Self::Conn>;
}

/// Production connector backed by the `redis` crate's synchronous API
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

impl RedisConnector {
    fn open(&self, host: &str, port: u16, timeout: Option<Duration>) -> RedisResult<redis::Connection> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host.to_string(), port),
            redis: RedisConnectionInfo::default(),
        };
        let client = redis::Client::open(info)?;
        match timeout {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
    }
}

impl Connector for RedisConnector {
    type Conn = RedisConnection;

    fn connect(&self, host: &str, port: u16, timeout: Option<Duration>) -> RedisResult<RedisConnection> {
        let inner = self.open(host, port, timeout)?;
        Ok(RedisConnection { inner })
    }

    fn connect_persistent(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
        id: &str,
    ) -> RedisResult<RedisConnection> {
        let mut inner = self.open(host, port, timeout)?;
        // The synchronous client has no transport-level pconnect; the tag
        // keeps the connection identifiable server-side (CLIENT LIST).
        redis::cmd("CLIENT")
            .arg("SETNAME")
            .arg(id)
            .query::<()>(&mut inner)?;
        Ok(RedisConnection { inner })
    }
}

/// Live connection produced by [`RedisConnector`]
pub struct RedisConnection {
    inner: redis::Connection,
}

impl RedisConnection {
    /// Underlying connection, for issuing data commands
    pub fn inner_mut(&mut self) -> &mut redis::Connection {
        &mut self.inner
    }
}

impl RawConnection for RedisConnection {
    fn auth(&mut self, password: &str) -> RedisResult<()> {
        redis::cmd("AUTH").arg(password).query(&mut self.inner)
    }

    fn select(&mut self, db: i64) -> RedisResult<()> {
        redis::cmd("SELECT").arg(db).query(&mut self.inner)
    }
}
