pub mod summary;

pub use summary::SimulationSummary;
