//! Simulated weather forecast upstream used by the demonstration endpoints

pub mod error;

use axum::http::StatusCode;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ForecastConfig;
use crate::errors::kinds;
use crate::models::forecast::{WeatherForecast, SUMMARIES};
use crate::utils::Dice;
use crate::wrap::MappingTable;

pub use error::ForecastError;

/// Days covered by one forecast
pub const FORECAST_DAYS: u64 = 5;

/// Mapping used by the synchronous endpoints
pub fn sync_table() -> MappingTable {
    MappingTable::new().map(kinds::INVALID_OPERATION, StatusCode::BAD_REQUEST)
}

/// Mapping used by the asynchronous endpoint. Rate limiting is declared
/// before its parent kind so it keeps its own status.
pub fn async_table() -> MappingTable {
    MappingTable::new()
        .map(kinds::TIMEOUT, StatusCode::REQUEST_TIMEOUT)
        .map(kinds::ARGUMENT, StatusCode::BAD_REQUEST)
        .map(kinds::RATE_LIMITED, StatusCode::TOO_MANY_REQUESTS)
        .map(kinds::INVALID_OPERATION, StatusCode::BAD_REQUEST)
}

#[derive(Clone)]
pub struct ForecastService {
    config: ForecastConfig,
    dice: Arc<dyn Dice>,
}

impl ForecastService {
    pub fn new(config: ForecastConfig, dice: Arc<dyn Dice>) -> Self {
        Self { config, dice }
    }

    /// Synchronous forecast failing once in `sync_failure_one_in` calls.
    pub fn forecast(&self, failure_message: &str) -> Result<Vec<WeatherForecast>, ForecastError> {
        if self.dice.roll(self.config.sync_failure_one_in) == 0 {
            debug!(reason = failure_message, "Simulated forecast failure");
            return Err(ForecastError::InvalidOperation(failure_message.to_string()));
        }

        Ok(self.generate(Local::now().date_naive()))
    }

    /// Asynchronous forecast behind a simulated upstream call bounded by the
    /// configured deadline.
    pub async fn forecast_async(&self) -> Result<Vec<WeatherForecast>, ForecastError> {
        tokio::time::timeout(self.config.deadline, tokio::time::sleep(self.config.delay))
            .await
            .map_err(|_| {
                info!(
                    deadline_ms = self.config.deadline.as_millis() as u64,
                    "Forecast upstream missed its deadline"
                );
                ForecastError::TimedOut
            })?;

        let sides = self.config.async_failure_one_in;
        if self.dice.roll(sides) == 0 {
            return Err(ForecastError::RateLimited);
        }
        if self.dice.roll(sides) == 1 {
            return Err(ForecastError::InvalidRange);
        }
        if self.dice.roll(sides) == 2 {
            return Err(ForecastError::unavailable());
        }

        Ok(self.generate(Local::now().date_naive()))
    }

    fn generate(&self, today: NaiveDate) -> Vec<WeatherForecast> {
        (1..=FORECAST_DAYS)
            .map(|offset| {
                let temperature_c = self.dice.roll(75) as i32 - 20;
                let summary = SUMMARIES[self.dice.roll(SUMMARIES.len() as u32) as usize];
                WeatherForecast::for_offset(today, offset, temperature_c, summary)
            })
            .collect()
    }
}
