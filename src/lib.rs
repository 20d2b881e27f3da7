// Library crate - synthetic equity paths and the metrics computed from them

pub mod config;
pub mod simulation;
pub mod metrics;
pub mod export;
pub mod sweep;

// Re-export commonly used types
pub use config::{SimulationParams, TRADING_DAYS_PER_YEAR};
pub use simulation::{generate_path, SimulatedPath};
pub use metrics::{analyze, Analysis, MetricsReport};
