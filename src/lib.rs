//a Rust-based Monte Carlo price path simulator for cryptocurrencies

pub mod app;
pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod render;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::app::{run_simulation, RunOutcome};
    pub use crate::config::{ConfigOverrides, SimulationConfiguration, SourceConfig};
    pub use crate::data::{
        load_price_csv, parse_market_chart, CoinGeckoClient, CsvPriceSource, FetchError,
        PricePoint, PriceSeries, PriceSource,
    };
    pub use crate::engine::{
        compute_returns, day_labels, simulate, RandomSource, ReturnError, SeededRandom,
        SequenceRandom, SimulationError, SimulationParams, SimulationPath, SimulationResult,
    };
    pub use crate::metrics::SimulationSummary;
    pub use crate::render::{
        ChartHandle, ChartRenderer, ChartSession, CsvChartRenderer, HtmlChartRenderer,
    };
}
