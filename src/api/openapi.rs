use utoipa::OpenApi;

use crate::errors::ErrorEnvelope;
use crate::models::forecast::WeatherForecast;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SafeWrap Examples",
        version = "0.1.0",
        description = "Weather forecast endpoints demonstrating the SafeWrap result/error classification wrapper. Failures are reported as an envelope carrying the original message and error kind, with a status chosen by an ordered kind-to-status mapping."
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::get_safe,
        crate::api::handlers::get_safe_async,
        crate::api::handlers::get_safe_implicit,
    ),
    components(
        schemas(
            WeatherForecast,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "weatherforecast", description = "Forecast endpoints wrapped by SafeWrap"),
    )
)]
pub struct ApiDoc;
