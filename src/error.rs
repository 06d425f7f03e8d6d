/// Library-level errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connect, persistent-connect, authenticate or select failed.
    ///
    /// Every failure in the connection sequence collapses to this kind; the
    /// underlying client error carries the original message and code.
    #[error("connection setup failed: {0}")]
    ConnectionSetup(#[from] redis::RedisError),

    /// A configuration value could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
