use crate::engine::random::RandomSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_NUM_DAYS: usize = 30;
pub const DEFAULT_NUM_SIMULATIONS: usize = 300;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Cannot simulate from an empty return series")]
    EmptyReturns,
    #[error("Number of simulated days must be at least 1")]
    ZeroDays,
    #[error("Number of simulations must be at least 1")]
    ZeroSimulations,
    #[error("Start price must be finite, got {0}")]
    NonFiniteStartPrice(f64),
}

//one simulated trajectory, element 0 is the start price
pub type SimulationPath = Vec<f64>;

//parameters for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub num_days: usize,
    pub num_simulations: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            num_days: DEFAULT_NUM_DAYS,
            num_simulations: DEFAULT_NUM_SIMULATIONS,
        }
    }
}

impl SimulationParams {
    pub fn new(num_days: usize, num_simulations: usize) -> Self {
        SimulationParams {
            num_days,
            num_simulations,
        }
    }
}

//result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    //num_simulations paths of num_days + 1 prices each
    pub paths: Vec<SimulationPath>,

    //average_path[j] is the mean price at simulated day j + 1
    pub average_path: Vec<f64>,
}

impl SimulationResult {
    pub fn num_days(&self) -> usize {
        self.average_path.len()
    }

    pub fn num_simulations(&self) -> usize {
        self.paths.len()
    }

    pub fn start_price(&self) -> Option<f64> {
        self.paths.first().and_then(|path| path.first().copied())
    }

    //last price of every path
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|path| path.last().copied())
            .collect()
    }

    //"Day 1".."Day N" labels for the average path
    pub fn day_labels(&self) -> Vec<String> {
        day_labels(self.num_days())
    }
}

pub fn day_labels(num_days: usize) -> Vec<String> {
    (1..=num_days).map(|day| format!("Day {}", day)).collect()
}

//bootstrap monte carlo simulation
//each step draws one historical return uniformly with replacement
//and applies it to the previous price
pub fn simulate<R: RandomSource + ?Sized>(
    start_price: f64,
    returns: &[f64],
    params: &SimulationParams,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    if returns.is_empty() {
        return Err(SimulationError::EmptyReturns);
    }
    if params.num_days == 0 {
        return Err(SimulationError::ZeroDays);
    }
    if params.num_simulations == 0 {
        return Err(SimulationError::ZeroSimulations);
    }
    if !start_price.is_finite() {
        return Err(SimulationError::NonFiniteStartPrice(start_price));
    }

    debug!(
        start_price,
        num_returns = returns.len(),
        num_days = params.num_days,
        num_simulations = params.num_simulations,
        "running bootstrap simulation"
    );

    let mut paths = Vec::with_capacity(params.num_simulations);
    //running sums per day, divided once at the end
    let mut sums = vec![0.0; params.num_days];

    for _ in 0..params.num_simulations {
        let mut path = Vec::with_capacity(params.num_days + 1);
        path.push(start_price);

        let mut price = start_price;
        for sum in sums.iter_mut() {
            let drawn = returns[rng.pick_index(returns.len())];
            price *= 1.0 + drawn;
            path.push(price);
            *sum += price;
        }

        paths.push(path);
    }

    let count = params.num_simulations as f64;
    let average_path = sums.into_iter().map(|sum| sum / count).collect();

    Ok(SimulationResult {
        paths,
        average_path,
    })
}
