/**
 * Server Configuration
 *
 * Loads `ServerConfig` from the environment at startup and logs the
 * effective values.
 *
 * # Configuration Sources
 *
 * 1. Process environment variables (`CHAT_*`, `SERVER_PORT`), including
 *    any the binary loaded from `.env` before calling in here
 * 2. Built-in defaults
 *
 * Unlike optional services, a malformed variable is a startup error: the
 * server refuses to run with a half-applied configuration.
 */

use crate::shared::{ConfigError, ServerConfig};

/// Load configuration from the process environment
///
/// # Errors
///
/// Returns `ConfigError` when a variable cannot be parsed or the resulting
/// configuration fails validation.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_messages = config.max_messages,
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        stream_poll_secs = config.stream_poll.as_secs(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );
    Ok(config)
}
