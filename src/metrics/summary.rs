use crate::data::PriceSeries;
use crate::engine::SimulationResult;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//descriptive summary of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub symbol: String,
    pub history_points: usize,
    pub start_price: f64,
    pub mean_daily_return: f64,
    pub daily_return_std_dev: f64,
    pub num_simulations: usize,
    pub num_days: usize,
    pub final_average_price: f64,
    pub expected_change_pct: f64,
    pub lowest_terminal_price: f64,
    pub highest_terminal_price: f64,
}

impl SimulationSummary {
    //summarizes the inputs and terminal prices of a run
    pub fn from_run(history: &PriceSeries, returns: &[f64], result: &SimulationResult) -> Self {
        let start_price = result
            .start_price()
            .or_else(|| history.last_price())
            .unwrap_or(0.0);

        let mean_daily_return = if returns.is_empty() { 0.0 } else { returns.mean() };

        //sample std dev is undefined below two observations
        let daily_return_std_dev = if returns.len() < 2 {
            0.0
        } else {
            returns.std_dev()
        };

        let final_average_price = result.average_path.last().copied().unwrap_or(start_price);

        let expected_change_pct = if start_price != 0.0 {
            final_average_price / start_price - 1.0
        } else {
            0.0
        };

        let terminal = result.terminal_prices();
        let lowest_terminal_price = terminal.iter().copied().fold(f64::INFINITY, f64::min);
        let highest_terminal_price = terminal.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        SimulationSummary {
            symbol: history.symbol.clone(),
            history_points: history.len(),
            start_price,
            mean_daily_return,
            daily_return_std_dev,
            num_simulations: result.num_simulations(),
            num_days: result.num_days(),
            final_average_price,
            expected_change_pct,
            lowest_terminal_price,
            highest_terminal_price,
        }
    }

    //builds the summary table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Ticker"),
            Cell::new(&self.symbol),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Historical Prices"),
            Cell::new(&format!("{}", self.history_points)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Start Price"),
            Cell::new(&format!("${:.2}", self.start_price)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Mean Daily Return"),
            Cell::new(&format!("{:.3}%", self.mean_daily_return * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Daily Return Std Dev"),
            Cell::new(&format!("{:.3}%", self.daily_return_std_dev * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Simulations"),
            Cell::new(&format!("{}", self.num_simulations)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Days Simulated"),
            Cell::new(&format!("{}", self.num_days)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new(&format!("Average Price (Day {})", self.num_days)),
            Cell::new(&format!(
                "${:.2} ({:+.2}%)",
                self.final_average_price,
                self.expected_change_pct * 100.0
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Lowest Terminal Price"),
            Cell::new(&format!("${:.2}", self.lowest_terminal_price)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Highest Terminal Price"),
            Cell::new(&format!("${:.2}", self.highest_terminal_price)),
        ]));

        table
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PricePoint;
    use crate::engine::{compute_returns, simulate, SequenceRandom, SimulationParams};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn history(prices: &[f64]) -> PriceSeries {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PricePoint::new(Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(), p)
            })
            .collect();
        PriceSeries::new("bitcoin", points)
    }

    #[test]
    fn summary_reflects_inputs_and_terminal_prices() {
        let history = history(&[100.0, 110.0, 99.0]);
        let returns = compute_returns(&history.prices()).unwrap();
        let mut rng = SequenceRandom::from_indices(&[0, 1], returns.len());
        let result = simulate(99.0, &returns, &SimulationParams::new(1, 2), &mut rng).unwrap();

        let summary = SimulationSummary::from_run(&history, &returns, &result);
        assert_eq!(summary.symbol, "bitcoin");
        assert_eq!(summary.history_points, 3);
        assert_eq!(summary.num_simulations, 2);
        assert_eq!(summary.num_days, 1);
        assert_eq!(summary.start_price, 99.0);
        assert_relative_eq!(summary.mean_daily_return, 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.lowest_terminal_price, 89.1, max_relative = 1e-12);
        assert_relative_eq!(summary.highest_terminal_price, 108.9, max_relative = 1e-12);
        assert_relative_eq!(summary.final_average_price, 99.0, max_relative = 1e-12);
        assert_relative_eq!(summary.expected_change_pct, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn single_return_has_zero_std_dev() {
        let history = history(&[10.0, 11.0]);
        let returns = compute_returns(&history.prices()).unwrap();
        let mut rng = SequenceRandom::first_index();
        let result = simulate(11.0, &returns, &SimulationParams::new(2, 1), &mut rng).unwrap();

        let summary = SimulationSummary::from_run(&history, &returns, &result);
        assert_eq!(summary.daily_return_std_dev, 0.0);
        assert_eq!(summary.to_table().len(), 11);
    }
}
