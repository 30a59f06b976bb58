//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use leaderboard::db::{DatabaseConfig, DatabaseConfigError};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use subtle::ConstantTimeEq;

const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_REALM: &str = "Access to the '/' path";
const MIN_PASSWORD_LEN: usize = 8;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Which player store backs the tournament
    pub store: StoreBackend,
    /// Database configuration, used by the `postgres` backend
    pub database: DatabaseConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Prometheus exporter address, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

/// Player store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                var: "STORE_BACKEND".to_string(),
                reason: format!("Unknown backend '{other}', expected 'postgres' or 'memory'"),
            }),
        }
    }
}

/// Credentials guarding the player endpoints
#[derive(Clone)]
pub struct SecurityConfig {
    /// Basic auth login
    pub admin_login: String,
    /// Basic auth password
    pub admin_password: String,
    /// Realm announced in `WWW-Authenticate`
    pub realm: String,
}

impl SecurityConfig {
    pub fn new(admin_login: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            admin_login: admin_login.into(),
            admin_password: admin_password.into(),
            realm: DEFAULT_REALM.to_string(),
        }
    }

    /// Check presented credentials in constant time
    pub fn verify(&self, login: &str, password: &str) -> bool {
        let login_ok = self.admin_login.as_bytes().ct_eq(login.as_bytes());
        let password_ok = self.admin_password.as_bytes().ct_eq(password.as_bytes());
        (login_ok & password_ok).into()
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("admin_login", &self.admin_login)
            .field("admin_password", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `store_override` - Optional store backend override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ServerConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
        store_override: Option<StoreBackend>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env("SERVER_BIND")?
                .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_BIND_PORT))),
        };

        let store = match store_override {
            Some(store) => store,
            None => parse_env("STORE_BACKEND")?.unwrap_or(StoreBackend::Postgres),
        };

        let mut database = DatabaseConfig::from_env().map_err(|e| match e {
            DatabaseConfigError::Invalid { var, value } => ConfigError::Invalid {
                var,
                reason: format!("Cannot parse '{value}'"),
            },
        })?;
        if let Some(database_url) = database_url_override {
            database.database_url = database_url;
        }

        // Security configuration (REQUIRED)
        let admin_login = std::env::var("ADMIN_LOGIN").map_err(|_| ConfigError::MissingRequired {
            var: "ADMIN_LOGIN".to_string(),
            hint: "Login expected in the Basic Authorization header".to_string(),
        })?;

        let admin_password =
            std::env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::MissingRequired {
                var: "ADMIN_PASSWORD".to_string(),
                hint: "Generate with: openssl rand -hex 16".to_string(),
            })?;

        let security = SecurityConfig {
            admin_login,
            admin_password,
            realm: std::env::var("AUTH_REALM").unwrap_or_else(|_| DEFAULT_REALM.to_string()),
        };

        let metrics_bind = parse_env("METRICS_BIND")?;

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(ServerConfig {
            bind,
            store,
            database,
            security,
            metrics_bind,
            static_dir,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.admin_login.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "ADMIN_LOGIN".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.security.admin_password.len() < MIN_PASSWORD_LEN {
            return Err(ConfigError::Invalid {
                var: "ADMIN_PASSWORD".to_string(),
                reason: format!("Must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }

        // Pool settings only matter when PostgreSQL is in use
        if self.store == StoreBackend::Postgres {
            if self.database.max_connections == 0 {
                return Err(ConfigError::Invalid {
                    var: "DB_MAX_CONNECTIONS".to_string(),
                    reason: "Must be greater than 0".to_string(),
                });
            }

            if self.database.min_connections > self.database.max_connections {
                return Err(ConfigError::Invalid {
                    var: "DB_MIN_CONNECTIONS".to_string(),
                    reason: format!(
                        "Cannot exceed max connections ({})",
                        self.database.max_connections
                    ),
                });
            }

            if self.database.query_timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "DB_QUERY_TIMEOUT_SECS".to_string(),
                    reason: "Must be greater than 0".to_string(),
                });
            }

            if self.database.connection_timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "DB_CONNECTION_TIMEOUT_SECS".to_string(),
                    reason: "Must be greater than 0".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional environment variable, rejecting malformed values
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:8080".parse().unwrap(),
            store: StoreBackend::Postgres,
            database: DatabaseConfig::development(),
            security: SecurityConfig::new("admin", "password123"),
            metrics_bind: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "ADMIN_PASSWORD".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ADMIN_PASSWORD"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_password() {
        let mut config = valid_config();
        config.security.admin_password = "short".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "ADMIN_PASSWORD"));
    }

    #[test]
    fn test_config_validation_pool_bounds() {
        let mut config = valid_config();
        config.database.min_connections = 50;
        config.database.max_connections = 10;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "DB_MIN_CONNECTIONS"));

        // Irrelevant for the in-memory backend
        config.store = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_security_verify() {
        let security = SecurityConfig::new("admin", "password123");
        assert!(security.verify("admin", "password123"));
        assert!(!security.verify("admin", "password124"));
        assert!(!security.verify("root", "password123"));
        assert!(!security.verify("", ""));
    }

    #[test]
    fn test_security_debug_redacts_password() {
        let security = SecurityConfig::new("admin", "password123");
        let debug = format!("{security:?}");
        assert!(!debug.contains("password123"));
    }
}
