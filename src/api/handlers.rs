use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::errors::ErrorEnvelope;
use crate::forecast::{self, ForecastService};
use crate::models::forecast::WeatherForecast;
use crate::wrap::SafeWrap;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub forecasts: ForecastService,
    pub instance_id: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "safe-wrap",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
        },
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Weather forecast through the synchronous executor
#[utoipa::path(
    get,
    path = "/weatherforecast/safe",
    tag = "weatherforecast",
    responses(
        (status = 200, description = "Five-day forecast", body = [WeatherForecast]),
        (status = 400, description = "A random error occurred during execution", body = ErrorEnvelope),
        (status = 500, description = "Unexpected error", body = ErrorEnvelope)
    )
)]
pub async fn get_safe(State(state): State<AppState>) -> Response {
    info!("Forecast request (sync)");

    SafeWrap::<Vec<WeatherForecast>>::new().execute(
        || state.forecasts.forecast("Random error occurred"),
        &forecast::sync_table(),
    )
}

/// Weather forecast through the asynchronous executor, with a simulated
/// upstream delay bounded by a deadline
#[utoipa::path(
    get,
    path = "/weatherforecast/safe/async",
    tag = "weatherforecast",
    responses(
        (status = 200, description = "Five-day forecast", body = [WeatherForecast]),
        (status = 400, description = "Invalid parameters or invalid operation", body = ErrorEnvelope),
        (status = 408, description = "The upstream missed its deadline", body = ErrorEnvelope),
        (status = 429, description = "Too many requests", body = ErrorEnvelope),
        (status = 500, description = "Unexpected error", body = ErrorEnvelope)
    )
)]
pub async fn get_safe_async(State(state): State<AppState>) -> Response {
    info!("Forecast request (async)");

    let forecasts = state.forecasts.clone();
    let table = forecast::async_table();

    SafeWrap::<Vec<WeatherForecast>>::new()
        .execute_async(
            move || async move { forecasts.forecast_async().await },
            &table,
        )
        .await
}

/// Weather forecast by running the wrapper up front and converting it
/// into a response afterwards
#[utoipa::path(
    get,
    path = "/weatherforecast/safe/implicit",
    tag = "weatherforecast",
    responses(
        (status = 200, description = "Five-day forecast", body = [WeatherForecast]),
        (status = 400, description = "A random error occurred during execution", body = ErrorEnvelope),
        (status = 500, description = "Unexpected error", body = ErrorEnvelope)
    )
)]
pub async fn get_safe_implicit(State(state): State<AppState>) -> impl IntoResponse {
    info!("Forecast request (implicit)");

    SafeWrap::run(
        || {
            state
                .forecasts
                .forecast("Random error in implicit operator example")
        },
        &forecast::sync_table(),
    )
}
