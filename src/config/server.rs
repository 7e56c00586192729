//! HTTP listener settings.

use std::net::SocketAddr;

use super::{ConfigError, ConfigResult, EnvConfigProvider};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `WEB_SEARCH_HOST` and `WEB_SEARCH_PORT`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_provider(&EnvConfigProvider::prefixed("WEB_SEARCH_"))
    }

    pub fn from_provider(env: &EnvConfigProvider) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(host) = env.get_raw("host")? {
            config.host = host;
        }
        if let Some(port) = env.get_parsed::<u16>("port")? {
            config.port = port;
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "address".into(),
                message: e.to_string(),
            })
    }
}
