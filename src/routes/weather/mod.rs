mod handler;
mod model;

pub use handler::get_weather;
pub use model::{WeatherQuery, WeatherResponse};
