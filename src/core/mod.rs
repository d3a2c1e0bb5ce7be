pub mod api;
pub mod columns;
pub mod embed;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod params;
pub mod request;
pub mod wire;
