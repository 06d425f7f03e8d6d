use crate::config::{ConnectionConfig, ConnectionOverrides, DEFAULT_CONNECTION};
use crate::error::Result;

use super::connector::{Connector, RawConnection};
use super::handle::Handle;

/// Builds one new, independently-connected handle
///
/// Resolves the configuration for the named connection, opens a standard or
/// persistent connection, authenticates when a password is configured, selects
/// the database unconditionally and records the key prefix on the handle.
pub(crate) fn build<C: Connector>(
    connector: &C,
    select: Option<i64>,
    connection: Option<&str>,
    overrides: &ConnectionOverrides,
) -> Result<Handle<C::Conn>> {
    let name = connection.unwrap_or(DEFAULT_CONNECTION);
    let config = ConnectionConfig::resolve(name, overrides)?;
    let db = select.unwrap_or(config.select);

    tracing::debug!(
        connection = %name,
        db,
        host = %config.host,
        port = config.port,
        persistent = config.persistent,
        "establishing redis connection"
    );

    let mut conn = if config.persistent {
        let id = format!("persistent_id_{}", db);
        connector.connect_persistent(&config.host, config.port, config.connect_timeout(), &id)?
    } else {
        connector.connect(&config.host, config.port, config.connect_timeout())?
    };

    if !config.password.is_empty() {
        conn.auth(&config.password)?;
    }

    conn.select(db)?;

    Ok(Handle::new(conn, name, db, config.prefix))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::connector::{MockConnector, MockRawConnection};
    use super::*;
    use crate::error::Error;

    /// A connection that tolerates any SELECT and nothing else
    fn connected() -> MockRawConnection {
        let mut conn = MockRawConnection::new();
        conn.expect_select().returning(|_| Ok(()));
        conn
    }

    #[test]
    fn test_persistent_connect_id_embeds_database_index() {
        let mut connector = MockConnector::new();
        connector
            .expect_connect_persistent()
            .withf(|_, _, _, id| id == "persistent_id_3")
            .times(1)
            .returning(|_, _, _, _| Ok(connected()));

        let overrides = ConnectionOverrides::new().persistent(true);
        let handle = build(&connector, Some(3), Some("fac_pers"), &overrides).unwrap();

        assert_eq!(handle.db(), 3);
    }

    #[test]
    fn test_standard_connect_uses_resolved_host_port_and_timeout() {
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .withf(|host, port, timeout| {
                host == "redis.example" && *port == 6380 && *timeout == Some(Duration::from_secs(30))
            })
            .times(1)
            .returning(|_, _, _| Ok(connected()));

        let overrides = ConnectionOverrides::new()
            .host("redis.example")
            .port(6380)
            .timeout(30.0);
        build(&connector, None, Some("fac_addr"), &overrides).unwrap();
    }

    #[test]
    fn test_empty_password_skips_auth() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_auth().never();
            conn.expect_select().times(1).returning(|_| Ok(()));
            Ok(conn)
        });

        let overrides = ConnectionOverrides::new().password("");
        build(&connector, None, Some("fac_noauth"), &overrides).unwrap();
    }

    #[test]
    fn test_password_is_passed_to_auth() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_auth()
                .withf(|password| password == "s3cret")
                .times(1)
                .returning(|_| Ok(()));
            conn.expect_select().returning(|_| Ok(()));
            Ok(conn)
        });

        let overrides = ConnectionOverrides::new().password("s3cret");
        build(&connector, None, Some("fac_auth"), &overrides).unwrap();
    }

    #[test]
    fn test_select_runs_even_for_default_database() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_select()
                .withf(|db| *db == 0)
                .times(1)
                .returning(|_| Ok(()));
            Ok(conn)
        });

        build(&connector, None, Some("fac_sel0"), &ConnectionOverrides::new()).unwrap();
    }

    #[test]
    fn test_explicit_select_beats_override() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_select()
                .withf(|db| *db == 0)
                .times(1)
                .returning(|_| Ok(()));
            Ok(conn)
        });

        // An explicit 0 is not "absent": the configured 5 must lose.
        let overrides = ConnectionOverrides::new().select(5);
        let handle = build(&connector, Some(0), Some("fac_sel_arg"), &overrides).unwrap();
        assert_eq!(handle.db(), 0);
    }

    #[test]
    fn test_absent_select_falls_back_to_configuration() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_select()
                .withf(|db| *db == 5)
                .times(1)
                .returning(|_| Ok(()));
            Ok(conn)
        });

        let overrides = ConnectionOverrides::new().select(5);
        let handle = build(&connector, None, Some("fac_sel_cfg"), &overrides).unwrap();
        assert_eq!(handle.db(), 5);
    }

    #[test]
    fn test_resolved_prefix_lands_on_the_handle() {
        let mut connector = MockConnector::new();
        connector
            .expect_connect()
            .returning(|_, _, _| Ok(connected()));

        let overrides = ConnectionOverrides::new().prefix("app:");
        let handle = build(&connector, None, Some("fac_prefix"), &overrides).unwrap();

        assert_eq!(handle.prefix(), "app:");
        assert_eq!(handle.prefixed("visits"), "app:visits");
    }

    #[test]
    fn test_connect_failure_is_wrapped() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            Err(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            )))
        });

        let err = build(&connector, None, Some("fac_down"), &ConnectionOverrides::new()).unwrap_err();
        assert!(matches!(err, Error::ConnectionSetup(_)));
    }

    #[test]
    fn test_auth_failure_is_wrapped() {
        let mut connector = MockConnector::new();
        connector.expect_connect().times(1).returning(|_, _, _| {
            let mut conn = MockRawConnection::new();
            conn.expect_auth().returning(|_| {
                Err(redis::RedisError::from((
                    redis::ErrorKind::AuthenticationFailed,
                    "invalid password",
                )))
            });
            Ok(conn)
        });

        let overrides = ConnectionOverrides::new().password("wrong");
        let err = build(&connector, None, Some("fac_badpw"), &overrides).unwrap_err();
        assert!(matches!(err, Error::ConnectionSetup(_)));
    }
}
