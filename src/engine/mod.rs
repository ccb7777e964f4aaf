pub mod random;
pub mod returns;
pub mod simulation;

pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use returns::{compute_returns, ReturnError};
pub use simulation::{
    day_labels, simulate, SimulationError, SimulationParams, SimulationPath, SimulationResult,
    DEFAULT_NUM_DAYS, DEFAULT_NUM_SIMULATIONS,
};
