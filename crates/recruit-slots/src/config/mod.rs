use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub crm: Option<CrmConfig>,
    pub snapshot_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let snapshot_path = non_empty_var("CRM_SNAPSHOT_PATH").map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            crm: CrmConfig::from_env(),
            snapshot_path,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Inbound webhook credentials for the CRM REST API.
///
/// All three values must be present; a partial set is treated as "not configured".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmConfig {
    pub domain: String,
    pub user_id: String,
    pub webhook_key: String,
}

impl CrmConfig {
    fn from_env() -> Option<Self> {
        Some(Self {
            domain: non_empty_var("CRM_DOMAIN")?,
            user_id: non_empty_var("CRM_USER_ID")?,
            webhook_key: non_empty_var("CRM_WEBHOOK_KEY")?,
        })
    }

    pub fn base_url(&self) -> String {
        format!(
            "https://{}/rest/{}/{}",
            self.domain, self.user_id, self.webhook_key
        )
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16 value"),
            ConfigError::InvalidHost { source } => {
                write!(f, "APP_HOST must be a valid IP address or 'localhost' ({source})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "CRM_DOMAIN",
            "CRM_USER_ID",
            "CRM_WEBHOOK_KEY",
            "CRM_SNAPSHOT_PATH",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.crm.is_none());
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "http");
        let error = AppConfig::load().expect_err("port must be numeric");
        assert!(matches!(error, ConfigError::InvalidPort));
        env::remove_var("APP_PORT");
    }

    #[test]
    fn crm_section_requires_every_credential() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CRM_DOMAIN", "example.bitrix24.pl");
        env::set_var("CRM_USER_ID", "42");
        let partial = AppConfig::load().expect("config loads");
        assert!(partial.crm.is_none());

        env::set_var("CRM_WEBHOOK_KEY", "secret");
        let config = AppConfig::load().expect("config loads");
        let crm = config.crm.expect("crm configured");
        assert_eq!(crm.base_url(), "https://example.bitrix24.pl/rest/42/secret");
        reset_env();
    }
}
