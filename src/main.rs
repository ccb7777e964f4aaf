use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coinpath::app::{open_sessions, reset_sessions, BoxedSession};
use coinpath::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coinpath")]
#[command(about = "Monte Carlo price path simulator for cryptocurrencies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a simulation and render the chart
    Run {
        //crypto ticker as known to coingecko (eg bitcoin, ethereum)
        #[arg(long)]
        ticker: Option<String>,

        //read price history from a csv file instead of the api
        #[arg(long)]
        data: Option<PathBuf>,

        //json configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        //market data api base url
        #[arg(long)]
        api_base: Option<String>,

        //quote currency
        #[arg(long)]
        vs_currency: Option<String>,

        //days of price history to fetch
        #[arg(long)]
        days_history: Option<u32>,

        //number of days to simulate
        #[arg(long)]
        num_days: Option<usize>,

        //number of simulated paths
        #[arg(long)]
        simulations: Option<usize>,

        //seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        //output path for the html chart
        #[arg(long)]
        output_html: Option<PathBuf>,

        //output path for the paths csv
        #[arg(long)]
        output_csv: Option<PathBuf>,
    },

    //remove the chart outputs of a previous run
    Reset {
        //json configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        //html chart to remove
        #[arg(long)]
        output_html: Option<PathBuf>,

        //paths csv to remove
        #[arg(long)]
        output_csv: Option<PathBuf>,
    },

    //write a default configuration file
    InitConfig {
        #[arg(long, default_value = "coinpath.json")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ticker,
            data,
            config,
            api_base,
            vs_currency,
            days_history,
            num_days,
            simulations,
            seed,
            output_html,
            output_csv,
        } => {
            let overrides = ConfigOverrides {
                ticker,
                data,
                api_base,
                vs_currency,
                days_history,
                num_days,
                num_simulations: simulations,
                seed,
                output_html,
                output_csv,
            };
            let config = load_config(config, overrides)?;
            run(&config)?;
        }
        Commands::Reset {
            config,
            output_html,
            output_csv,
        } => {
            let overrides = ConfigOverrides {
                output_html,
                output_csv,
                ..Default::default()
            };
            let config = load_config(config, overrides)?;
            let mut sessions = open_sessions(&config);
            reset_sessions(&mut sessions).context("Failed to reset chart outputs")?;
            println!("Simulation reset");
        }
        Commands::InitConfig { path } => {
            SimulationConfiguration::default()
                .to_json_file(&path)
                .context(format!("Failed to write config to {:?}", path))?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn load_config(
    path: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> Result<SimulationConfiguration> {
    let mut config = match path {
        Some(path) => SimulationConfiguration::from_json_file(&path)
            .context(format!("Failed to load config from {:?}", path))?,
        None => SimulationConfiguration::default(),
    };
    config.apply_overrides(overrides);
    Ok(config)
}

//resets every chart after a failure, keeping a cleanup failure in the error chain
fn fail_with_cleanup(
    sessions: &mut [BoxedSession],
    error: anyhow::Error,
    message: String,
) -> anyhow::Error {
    let error = error.context(message);
    match reset_sessions(sessions) {
        Ok(()) => error,
        Err(reset_error) => {
            error.context(format!("Failed to reset chart outputs: {:#}", reset_error))
        }
    }
}

fn run(config: &SimulationConfiguration) -> Result<()> {
    println!("Monte Carlo Simulation");
    println!("======================\n");

    let source = config.source.to_price_source();
    let mut rng = SeededRandom::from_optional_seed(config.seed);
    let mut sessions = open_sessions(config);

    let params = config.params();
    let outcome = match run_simulation(source.as_ref(), &config.ticker, &params, &mut rng) {
        Ok(outcome) => outcome,
        Err(e) => {
            //never leave a stale chart next to an error
            eprintln!("{}", e.user_message());
            let message = format!("Simulation for {} failed", config.ticker);
            return Err(fail_with_cleanup(&mut sessions, anyhow::Error::new(e), message));
        }
    };

    if let (Some(first), Some(last)) = (
        outcome.history.first_timestamp(),
        outcome.history.last_timestamp(),
    ) {
        println!("Loaded {} prices for {}", outcome.history.len(), config.ticker);
        println!("Date range: {} to {}\n", first, last);
    }

    let mut render_error = None;
    for session in sessions.iter_mut() {
        match session.show(&outcome.result) {
            Ok(handle) => println!("Chart saved to {:?}", handle.path),
            Err(e) => {
                render_error = Some(e);
                break;
            }
        }
    }

    if let Some(e) = render_error {
        let message = "Failed to render simulation".to_string();
        return Err(fail_with_cleanup(&mut sessions, e, message));
    }

    println!("\nSimulation Results");
    println!("==================\n");
    outcome.summary.pretty_print_table();

    Ok(())
}
