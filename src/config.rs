use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub instance_id: String,
}

/// Knobs for the demonstration forecast endpoints
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Simulated upstream latency of the async endpoint
    pub delay: Duration,
    /// Deadline the async endpoint gives the simulated upstream
    pub deadline: Duration,
    /// The sync endpoints fail once in this many calls
    pub sync_failure_one_in: u32,
    /// Each simulated async failure fires once in this many calls
    pub async_failure_one_in: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            deadline: Duration::from_millis(2000),
            sync_failure_one_in: 2,
            async_failure_one_in: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
                instance_id: env::var("INSTANCE_ID")
                    .or_else(|_| env::var("HOSTNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
            },
            forecast: ForecastConfig {
                delay: Duration::from_millis(
                    env::var("FORECAST_DELAY_MS")
                        .unwrap_or_else(|_| "1000".to_string())
                        .parse()
                        .context("FORECAST_DELAY_MS must be a valid number")?,
                ),
                deadline: Duration::from_millis(
                    env::var("FORECAST_DEADLINE_MS")
                        .unwrap_or_else(|_| "2000".to_string())
                        .parse()
                        .context("FORECAST_DEADLINE_MS must be a valid number")?,
                ),
                sync_failure_one_in: Self::one_in_from_env("FORECAST_SYNC_FAILURE_ONE_IN", 2)?,
                async_failure_one_in: Self::one_in_from_env("FORECAST_ASYNC_FAILURE_ONE_IN", 10)?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn one_in_from_env(key: &str, default: u32) -> Result<u32> {
        let value: u32 = match env::var(key) {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("{} must be a valid number", key))?,
            Err(_) => default,
        };

        if value == 0 {
            anyhow::bail!("{} must be at least 1", key);
        }
        Ok(value)
    }
}
