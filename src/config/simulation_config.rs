use crate::data::{
    CoinGeckoClient, CsvPriceSource, PriceSource, COINGECKO_API_BASE, DEFAULT_HISTORY_DAYS,
    DEFAULT_VS_CURRENCY,
};
use crate::engine::{SimulationParams, DEFAULT_NUM_DAYS, DEFAULT_NUM_SIMULATIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

//where price history comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    CoinGecko {
        api_base: String,
        vs_currency: String,
        days: u32,
        timeout_secs: u64,
    },
    Csv {
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::CoinGecko {
            api_base: COINGECKO_API_BASE.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            days: DEFAULT_HISTORY_DAYS,
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    //builds the price source this config describes
    pub fn to_price_source(&self) -> Box<dyn PriceSource> {
        match self {
            SourceConfig::CoinGecko {
                api_base,
                vs_currency,
                days,
                timeout_secs,
            } => Box::new(CoinGeckoClient::new(
                api_base.clone(),
                vs_currency.clone(),
                *days,
                Duration::from_secs(*timeout_secs),
            )),
            SourceConfig::Csv { path } => Box::new(CsvPriceSource::new(path.clone())),
        }
    }
}

//complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfiguration {
    //data
    pub ticker: String,
    pub source: SourceConfig,

    //simulation
    pub num_days: usize,
    pub num_simulations: usize,
    pub seed: Option<u64>,

    //optional output paths
    pub output_html: Option<PathBuf>,
    pub output_csv: Option<PathBuf>,
    pub chart_title: String,
}

impl Default for SimulationConfiguration {
    fn default() -> Self {
        SimulationConfiguration {
            ticker: "bitcoin".to_string(),
            source: SourceConfig::default(),
            num_days: DEFAULT_NUM_DAYS,
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            seed: None,
            output_html: Some(PathBuf::from("simulation.html")),
            output_csv: None,
            chart_title: "Monte Carlo Simulation".to_string(),
        }
    }
}

impl SimulationConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn params(&self) -> SimulationParams {
        SimulationParams::new(self.num_days, self.num_simulations)
    }

    //applies command line overrides, any Some value wins over the file
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(ticker) = overrides.ticker {
            self.ticker = ticker;
        }
        if let Some(path) = overrides.data {
            self.source = SourceConfig::Csv { path };
        }
        if let SourceConfig::CoinGecko {
            api_base,
            vs_currency,
            days,
            ..
        } = &mut self.source
        {
            if let Some(base) = overrides.api_base {
                *api_base = base;
            }
            if let Some(currency) = overrides.vs_currency {
                *vs_currency = currency;
            }
            if let Some(history_days) = overrides.days_history {
                *days = history_days;
            }
        }
        if let Some(num_days) = overrides.num_days {
            self.num_days = num_days;
        }
        if let Some(num_simulations) = overrides.num_simulations {
            self.num_simulations = num_simulations;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.output_html.is_some() {
            self.output_html = overrides.output_html;
        }
        if overrides.output_csv.is_some() {
            self.output_csv = overrides.output_csv;
        }
    }
}

//values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub ticker: Option<String>,
    pub data: Option<PathBuf>,
    pub api_base: Option<String>,
    pub vs_currency: Option<String>,
    pub days_history: Option<u32>,
    pub num_days: Option<usize>,
    pub num_simulations: Option<usize>,
    pub seed: Option<u64>,
    pub output_html: Option<PathBuf>,
    pub output_csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_thirty_days_three_hundred_paths() {
        let config = SimulationConfiguration::default();
        assert_eq!(config.params(), SimulationParams::new(30, 300));
        assert_eq!(config.seed, None);
        assert!(matches!(config.source, SourceConfig::CoinGecko { days: 120, .. }));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SimulationConfiguration::default();
        config.ticker = "ethereum".to_string();
        config.seed = Some(42);
        config.source = SourceConfig::Csv {
            path: PathBuf::from("prices.csv"),
        };
        config.to_json_file(&path).unwrap();

        let loaded = SimulationConfiguration::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimulationConfiguration =
            serde_json::from_str(r#"{"ticker": "solana", "num_days": 7}"#).unwrap();
        assert_eq!(config.ticker, "solana");
        assert_eq!(config.num_days, 7);
        assert_eq!(config.num_simulations, 300);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = SimulationConfiguration::default();
        config.apply_overrides(ConfigOverrides {
            ticker: Some("dogecoin".to_string()),
            vs_currency: Some("eur".to_string()),
            days_history: Some(30),
            num_simulations: Some(10),
            seed: Some(1),
            ..Default::default()
        });

        assert_eq!(config.ticker, "dogecoin");
        assert_eq!(config.num_simulations, 10);
        assert_eq!(config.num_days, 30);
        assert_eq!(config.seed, Some(1));
        match config.source {
            SourceConfig::CoinGecko {
                vs_currency, days, ..
            } => {
                assert_eq!(vs_currency, "eur");
                assert_eq!(days, 30);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn data_override_switches_to_csv() {
        let mut config = SimulationConfiguration::default();
        config.apply_overrides(ConfigOverrides {
            data: Some(PathBuf::from("history.csv")),
            ..Default::default()
        });
        assert_eq!(
            config.source,
            SourceConfig::Csv {
                path: PathBuf::from("history.csv")
            }
        );
        assert!(config.source.to_price_source().describe().contains("history.csv"));
    }
}
