//! Server configuration module
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! by the binary first), with defaults suited to local development. Tests
//! build configurations through [`ServerConfig::builder`].

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::shared::message::DEFAULT_MAX_AUTHOR_LEN;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_MESSAGES: usize = 500;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_STREAM_POLL: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_CONNECTIONS: usize = 1024;
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the group chat 🚀";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Number of messages the log retains
    pub max_messages: usize,
    /// Longest author name kept, in characters
    pub max_author_len: usize,
    /// Directory holding uploaded payloads
    pub upload_dir: PathBuf,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
    /// How long a stream worker waits before sending a keep-alive
    pub stream_poll: Duration,
    /// Concurrent in-flight request cap
    pub max_connections: usize,
    /// System message appended at startup, if any
    pub welcome_message: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            max_messages: DEFAULT_MAX_MESSAGES,
            max_author_len: DEFAULT_MAX_AUTHOR_LEN,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            stream_poll: DEFAULT_STREAM_POLL,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            welcome_message: Some(DEFAULT_WELCOME_MESSAGE.to_string()),
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `CHAT_HOST` | `host` |
    /// | `SERVER_PORT` | `port` |
    /// | `CHAT_MAX_MESSAGES` | `max_messages` |
    /// | `CHAT_MAX_AUTHOR_LEN` | `max_author_len` |
    /// | `CHAT_UPLOAD_DIR` | `upload_dir` |
    /// | `CHAT_MAX_UPLOAD_BYTES` | `max_upload_bytes` |
    /// | `CHAT_STREAM_POLL_SECS` | `stream_poll` |
    /// | `CHAT_MAX_CONNECTIONS` | `max_connections` |
    /// | `CHAT_WELCOME_MESSAGE` | `welcome_message` (empty disables) |
    ///
    /// Unset variables keep their defaults; unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(host) = env_parse::<IpAddr>("CHAT_HOST")? {
            builder = builder.host(host);
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Some(max) = env_parse::<usize>("CHAT_MAX_MESSAGES")? {
            builder = builder.max_messages(max);
        }
        if let Some(len) = env_parse::<usize>("CHAT_MAX_AUTHOR_LEN")? {
            builder = builder.max_author_len(len);
        }
        if let Ok(dir) = std::env::var("CHAT_UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(bytes) = env_parse::<usize>("CHAT_MAX_UPLOAD_BYTES")? {
            builder = builder.max_upload_bytes(bytes);
        }
        if let Some(secs) = env_parse::<u64>("CHAT_STREAM_POLL_SECS")? {
            builder = builder.stream_poll(Duration::from_secs(secs));
        }
        if let Some(max) = env_parse::<usize>("CHAT_MAX_CONNECTIONS")? {
            builder = builder.max_connections(max);
        }
        if let Ok(welcome) = std::env::var("CHAT_WELCOME_MESSAGE") {
            builder = builder.welcome_message(Some(welcome));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_messages == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_messages",
                message: "log capacity must be at least 1".to_string(),
            });
        }
        if self.max_author_len == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_author_len",
                message: "author length must be at least 1".to_string(),
            });
        }
        if self.stream_poll.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "stream_poll",
                message: "poll interval must be non-zero".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_connections",
                message: "connection limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: IpAddr) -> Self {
        self.config.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn max_messages(mut self, max: usize) -> Self {
        self.config.max_messages = max;
        self
    }

    pub fn max_author_len(mut self, len: usize) -> Self {
        self.config.max_author_len = len;
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn stream_poll(mut self, poll: Duration) -> Self {
        self.config.stream_poll = poll;
        self
    }

    pub fn max_connections(mut self, max: usize) -> Self {
        self.config.max_connections = max;
        self
    }

    /// Set the startup announcement; `None` or an empty string disables it
    pub fn welcome_message(mut self, message: Option<String>) -> Self {
        self.config.welcome_message = message.filter(|m| !m.trim().is_empty());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
    #[error("cannot parse environment variable {var}={value}")]
    Unparsable { var: &'static str, value: String },
}

fn env_parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Unparsable { var, value }),
        Err(_) => Ok(None),
    }
}
