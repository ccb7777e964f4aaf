use crate::data::loader::load_price_csv;
use crate::data::series::{PricePoint, PriceSeries};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_HISTORY_DAYS: u32 = 120;

const USER_FACING_MESSAGE: &str =
    "Unable to fetch the historical data. Please check the crypto ticker.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Ticker must not be empty")]
    EmptyTicker,
    #[error("Invalid ticker '{0}', only a-z, 0-9 and '-' are allowed")]
    InvalidTicker(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Market data API returned HTTP {code}")]
    Status { code: u16 },
    #[error("Failed to decode market data: {0}")]
    Decode(String),
    #[error("No price history returned for {ticker}")]
    EmptyHistory { ticker: String },
    #[error("Invalid timestamp '{value}' at line {line}")]
    InvalidTimestamp { line: usize, value: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FetchError {
    //message shown to the user, whatever went wrong underneath
    pub fn user_message(&self) -> &'static str {
        USER_FACING_MESSAGE
    }
}

//normalizes a coingecko coin id, rejecting anything that could alter the url
pub fn normalize_ticker(ticker: &str) -> Result<String, FetchError> {
    let ticker = ticker.trim().to_lowercase();
    if ticker.is_empty() {
        return Err(FetchError::EmptyTicker);
    }

    let valid = ticker
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(FetchError::InvalidTicker(ticker));
    }

    Ok(ticker)
}

//anything that can supply a price history for a ticker
pub trait PriceSource {
    fn fetch_prices(&self, ticker: &str) -> Result<PriceSeries, FetchError>;

    //short description for log output
    fn describe(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct MarketChart {
    //[[unix_millis, price], ...]
    prices: Vec<(f64, f64)>,
}

//parses a coingecko market_chart response body
pub fn parse_market_chart(body: &str, ticker: &str) -> Result<PriceSeries, FetchError> {
    let chart: MarketChart =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let mut points = Vec::with_capacity(chart.prices.len());
    for (millis, price) in chart.prices {
        let timestamp = Utc
            .timestamp_millis_opt(millis as i64)
            .single()
            .ok_or_else(|| FetchError::Decode(format!("invalid timestamp {}", millis)))?;
        points.push(PricePoint::new(timestamp, price));
    }

    if points.is_empty() {
        return Err(FetchError::EmptyHistory {
            ticker: ticker.to_string(),
        });
    }

    Ok(PriceSeries::new(ticker, points))
}

//client for the coingecko market_chart endpoint
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    pub api_base: String,
    pub vs_currency: String,
    pub days: u32,
    pub timeout: Duration,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        CoinGeckoClient {
            api_base: COINGECKO_API_BASE.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            days: DEFAULT_HISTORY_DAYS,
            timeout: Duration::from_secs(30),
        }
    }
}

impl CoinGeckoClient {
    pub fn new(api_base: String, vs_currency: String, days: u32, timeout: Duration) -> Self {
        CoinGeckoClient {
            api_base,
            vs_currency,
            days,
            timeout,
        }
    }

    //builds the request url for a ticker (ticker is lower-cased)
    pub fn market_chart_url(&self, ticker: &str) -> Result<String, FetchError> {
        let ticker = normalize_ticker(ticker)?;
        Ok(format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.api_base.trim_end_matches('/'),
            ticker,
            self.vs_currency,
            self.days
        ))
    }
}

impl PriceSource for CoinGeckoClient {
    fn fetch_prices(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        let ticker = normalize_ticker(ticker)?;
        let url = self.market_chart_url(&ticker)?;
        info!(%url, "fetching price history");

        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = match agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                warn!(code, %ticker, "market data request rejected");
                return Err(FetchError::Status { code });
            }
            Err(e) => {
                warn!(error = %e, %ticker, "market data request failed");
                return Err(FetchError::Network(e.to_string()));
            }
        };

        let body = response.into_string()?;
        let series = parse_market_chart(&body, &ticker)?;
        debug!(points = series.len(), %ticker, "price history decoded");

        Ok(series)
    }

    fn describe(&self) -> String {
        format!("CoinGecko ({}, {} days)", self.vs_currency, self.days)
    }
}

//reads price history from a local csv file
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    pub path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: PathBuf) -> Self {
        CsvPriceSource { path }
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch_prices(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        let ticker = ticker.trim().to_lowercase();
        let symbol = if ticker.is_empty() { None } else { Some(ticker.as_str()) };
        let points = load_price_csv(&self.path, symbol)?;

        if points.is_empty() {
            return Err(FetchError::EmptyHistory { ticker });
        }

        Ok(PriceSeries::new(ticker, points))
    }

    fn describe(&self) -> String {
        format!("CSV file {:?}", self.path)
    }
}
