//! HTTP API handlers for ratings-svc

pub mod config;
pub mod health;
pub mod ratings;

pub use config::config_routes;
pub use health::health_routes;
pub use ratings::rating_routes;
