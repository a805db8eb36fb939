//! Application configuration from CLI flags and environment variables.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use clap::Parser;
use tracing::warn;

/// Minimum bytes of key material accepted for cookie signing.
const MIN_KEY_BYTES: usize = 32;

/// Configuration failures surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET_KEY must be set (release builds have no generated fallback)")]
    MissingSessionKey,

    #[error("SESSION_SECRET_KEY must be at least {MIN_KEY_BYTES} bytes, got {0}")]
    SessionKeyTooShort(usize),
}

fn parse_flag(raw: &str) -> Result<bool, std::convert::Infallible> {
    Ok(raw != "0")
}

/// Runtime configuration for the `waymark` server.
#[derive(Debug, Parser)]
#[command(name = "waymark", about = "Backend for rating landmarks along walking routes")]
pub struct AppConfig {
    /// SQLite database path or URI.
    #[arg(long, env = "DATABASE_URL", default_value = "walks.db")]
    pub database_url: String,

    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Secret key material for signing session cookies.
    #[arg(long, env = "SESSION_SECRET_KEY", hide_env_values = true)]
    pub session_secret_key: Option<String>,

    /// Mark session cookies `Secure`; pass 0 to allow plain HTTP.
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value = "1", value_parser = parse_flag, action = clap::ArgAction::Set)]
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Derive the cookie-signing key from configured material.
    ///
    /// Debug builds fall back to an ephemeral generated key so local runs
    /// work without secrets; release builds refuse to start without one.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        match self.session_secret_key.as_deref() {
            Some(material) if material.len() < MIN_KEY_BYTES => {
                Err(ConfigError::SessionKeyTooShort(material.len()))
            }
            Some(material) => Ok(Key::derive_from(material.as_bytes())),
            None if cfg!(debug_assertions) => {
                warn!("using temporary session key (dev only); sessions reset on restart");
                Ok(Key::generate())
            }
            None => Err(ConfigError::MissingSessionKey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> AppConfig {
        let mut args = vec!["waymark".to_owned()];
        if let Some(key) = key {
            args.push(format!("--session-secret-key={key}"));
        }
        AppConfig::parse_from(args)
    }

    #[test]
    fn short_key_material_is_rejected() {
        let config = config_with_key(Some("too-short"));
        assert!(matches!(
            config.session_key(),
            Err(ConfigError::SessionKeyTooShort(9))
        ));
    }

    #[test]
    fn long_key_material_is_accepted() {
        let config = config_with_key(Some(&"k".repeat(64)));
        assert!(config.session_key().is_ok());
    }

    #[test]
    fn missing_key_falls_back_to_an_ephemeral_one_in_debug() {
        let config = config_with_key(None);
        assert!(config.session_key().is_ok());
    }

    #[test]
    fn cookie_secure_zero_disables_the_flag() {
        let config = AppConfig::parse_from(["waymark", "--cookie-secure=0"]);
        assert!(!config.cookie_secure);
    }
}
