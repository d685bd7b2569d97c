pub mod forecast;

pub use forecast::WeatherForecast;
