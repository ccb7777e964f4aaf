pub mod fetch;
pub mod loader;
pub mod series;

pub use fetch::{
    normalize_ticker, parse_market_chart, CoinGeckoClient, CsvPriceSource, FetchError, PriceSource,
    COINGECKO_API_BASE, DEFAULT_HISTORY_DAYS, DEFAULT_VS_CURRENCY,
};
pub use loader::load_price_csv;
pub use series::{PricePoint, PriceSeries};
