use crate::config::SimulationConfiguration;
use crate::data::{FetchError, PriceSeries, PriceSource};
use crate::engine::{
    compute_returns, simulate, RandomSource, ReturnError, SimulationError, SimulationParams,
    SimulationResult,
};
use crate::metrics::SimulationSummary;
use crate::render::{ChartHandle, ChartRenderer, ChartSession, CsvChartRenderer, HtmlChartRenderer};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Returns(#[from] ReturnError),
    #[error("Need at least 2 historical prices to compute returns, got {0}")]
    InsufficientHistory(usize),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl RunError {
    //message suitable for showing in place of the chart
    pub fn user_message(&self) -> String {
        match self {
            RunError::Fetch(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

//everything produced by one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub history: PriceSeries,
    pub returns: Vec<f64>,
    pub result: SimulationResult,
    pub summary: SimulationSummary,
}

//fetches history, computes returns and simulates from the last price
pub fn run_simulation<R: RandomSource + ?Sized>(
    source: &dyn PriceSource,
    ticker: &str,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<RunOutcome, RunError> {
    info!(ticker, source = %source.describe(), "loading price history");
    let history = source.fetch_prices(ticker)?;

    let prices = history.prices();
    let returns = compute_returns(&prices)?;
    if returns.is_empty() {
        return Err(RunError::InsufficientHistory(prices.len()));
    }

    //checked above, a non-empty return series implies at least 2 prices
    let start_price = prices[prices.len() - 1];

    info!(
        points = history.len(),
        start_price,
        num_days = params.num_days,
        num_simulations = params.num_simulations,
        "simulating"
    );
    let result = simulate(start_price, &returns, params, rng)?;
    let summary = SimulationSummary::from_run(&history, &returns, &result);

    Ok(RunOutcome {
        history,
        returns,
        result,
        summary,
    })
}

pub type BoxedSession = ChartSession<Box<dyn ChartRenderer>>;

//one chart session per configured output
//an output file left by an earlier run is adopted so it gets replaced or reset
pub fn open_sessions(config: &SimulationConfiguration) -> Vec<BoxedSession> {
    let mut sessions = Vec::new();

    if let Some(path) = &config.output_html {
        let renderer: Box<dyn ChartRenderer> =
            Box::new(HtmlChartRenderer::new(path.clone(), config.chart_title.clone()));
        sessions.push(open_session(renderer, path));
    }

    if let Some(path) = &config.output_csv {
        let renderer: Box<dyn ChartRenderer> = Box::new(CsvChartRenderer::new(path.clone()));
        sessions.push(open_session(renderer, path));
    }

    sessions
}

fn open_session(renderer: Box<dyn ChartRenderer>, path: &std::path::Path) -> BoxedSession {
    if path.exists() {
        ChartSession::resume(renderer, ChartHandle::new(path.to_path_buf()))
    } else {
        ChartSession::new(renderer)
    }
}

//resets every session, returning the first failure once all were tried
pub fn reset_sessions(sessions: &mut [BoxedSession]) -> anyhow::Result<()> {
    let mut first_error = None;

    for session in sessions.iter_mut() {
        if let Err(e) = session.reset() {
            warn!(renderer = session.renderer().name(), error = %e, "failed to reset chart");
            let e = e.context(format!("Failed to reset {} chart", session.renderer().name()));
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
