use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: PathBuf,
    pub scan_delay: Duration,
    pub otp_delay: Duration,
    /// Upper bound on any single call to the identification or OTP service.
    pub service_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("HERDBOOK_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("HERDBOOK_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let db_path = std::env::var("HERDBOOK_DB_PATH")
            .unwrap_or_else(|_| "./herdbook.redb".to_string())
            .into();

        Ok(Config {
            listen_addr,
            db_path,
            scan_delay: Self::millis("HERDBOOK_SCAN_DELAY_MS", 3000)?,
            otp_delay: Self::millis("HERDBOOK_OTP_DELAY_MS", 1000)?,
            service_timeout: Self::millis("HERDBOOK_SERVICE_TIMEOUT_MS", 10_000)?,
        })
    }

    fn millis(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
        match std::env::var(var) {
            Ok(s) if !s.is_empty() => s
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid(var, "must be a whole number of milliseconds")),
            _ => Ok(Duration::from_millis(default)),
        }
    }

    /// Configuration with instant services, for tests.
    pub fn for_testing(db_path: PathBuf) -> Self {
        Config {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_path,
            scan_delay: Duration::ZERO,
            otp_delay: Duration::ZERO,
            service_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
