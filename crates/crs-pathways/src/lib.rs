pub mod config;
pub mod crs;
pub mod error;
pub mod telemetry;
