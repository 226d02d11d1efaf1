//! Upstream API clients

/// Shared utilities used by the clients.
pub mod common;

mod drive;
mod weather;

pub use drive::{DRIVE_API_BASE, DRIVE_UPLOAD_BASE, DriveClient};
pub use weather::{MAX_FORECAST_DAYS, WeatherClient};
