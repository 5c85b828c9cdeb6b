//! Server configuration.

use crate::domain::{DisplayName, ValueObjectError};

/// Runtime configuration of the relay
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Display name for clients that connect without a nickname
    pub default_nickname: DisplayName,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_NICKNAME: &'static str = "Anonymous";

    /// # Errors
    ///
    /// Returns `DisplayNameEmpty` if `default_nickname` is blank.
    pub fn new(
        host: String,
        port: u16,
        default_nickname: String,
    ) -> Result<Self, ValueObjectError> {
        Ok(Self {
            host,
            port,
            default_nickname: DisplayName::new(default_nickname)?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            default_nickname: DisplayName::new(Self::DEFAULT_NICKNAME.to_string())
                .unwrap_or_else(|_| DisplayName::system()),
        }
    }
}
