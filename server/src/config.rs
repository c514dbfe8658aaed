use std::env;
use std::fmt;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "PORT is not a valid port: {:?}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Reads `HOST` and `PORT`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("HOST").ok(), env::var("PORT").ok())
    }

    pub fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_uses_defaults() {
        let config = ServerConfig::from_vars(None, None).expect("");
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    fn it_overrides_port() {
        let config = ServerConfig::from_vars(Some("127.0.0.1".into()), Some("8080".into()))
            .expect("");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn it_rejects_invalid_port() {
        assert_eq!(
            ServerConfig::from_vars(None, Some("eighty".into())),
            Err(ConfigError::InvalidPort("eighty".into()))
        );
        assert!(ServerConfig::from_vars(None, Some("70000".into())).is_err());
    }
}
