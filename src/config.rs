use serde::Deserialize;

use crate::error::Result;

/// Connection name used when the caller does not supply one
pub const DEFAULT_CONNECTION: &str = "default";

/// Resolved configuration for one named Redis connection
///
/// Loaded from environment variables of the form `REDIS_<NAME>_<FIELD>`,
/// e.g. `REDIS_QUEUE_HOST` for the `queue` connection. Fields without a
/// variable fall back to their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Redis server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Password for AUTH; empty means no authentication
    #[serde(default)]
    pub password: String,

    /// Connect timeout in seconds; 0 blocks indefinitely
    #[serde(default)]
    pub timeout: f64,

    /// Prefix applied to keys composed through the handle
    #[serde(default)]
    pub prefix: String,

    /// Whether to open a persistent, transport-reusable connection
    #[serde(default)]
    pub persistent: bool,

    /// Database index selected after connecting
    #[serde(default)]
    pub select: i64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            password: String::new(),
            timeout: 0.0,
            prefix: String::new(),
            persistent: false,
            select: 0,
        }
    }
}

impl ConnectionConfig {
    /// Loads the configuration for a named connection from environment variables
    pub fn from_env(connection: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let prefix = format!("REDIS_{}_", connection.to_uppercase());
        Ok(envy::prefixed(prefix).from_env::<ConnectionConfig>()?)
    }

    /// Resolves the effective configuration for a named connection
    ///
    /// Field resolution order: explicit override, then environment, then default.
    pub fn resolve(connection: &str, overrides: &ConnectionOverrides) -> Result<Self> {
        let mut config = Self::from_env(connection)?;
        overrides.apply(&mut config);
        Ok(config)
    }

    /// Connect timeout as a duration; `None` blocks indefinitely
    pub fn connect_timeout(&self) -> Option<std::time::Duration> {
        if self.timeout > 0.0 {
            Some(std::time::Duration::from_secs_f64(self.timeout))
        } else {
            None
        }
    }
}

/// Caller-supplied configuration overrides
///
/// Every field is optional; `None` falls through to the environment and then
/// to the default.
#[derive(Debug, Default, Clone)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
    pub timeout: Option<f64>,
    pub prefix: Option<String>,
    pub persistent: Option<bool>,
    pub select: Option<i64>,
}

impl ConnectionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Connect timeout in seconds; 0 blocks indefinitely
    pub fn timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    pub fn select(mut self, select: i64) -> Self {
        self.select = Some(select);
        self
    }

    fn apply(&self, config: &mut ConnectionConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(persistent) = self.persistent {
            config.persistent = persistent;
        }
        if let Some(select) = self.select {
            config.select = select;
        }
    }
}
