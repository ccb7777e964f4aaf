pub mod simulation_config;

pub use simulation_config::{ConfigOverrides, SimulationConfiguration, SourceConfig};
