use crate::engine::SimulationResult;
use crate::render::{remove_chart_file, ChartHandle, ChartRenderer};
use anyhow::{Context, Result};
use plotly::common::{Line, Mode};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use std::path::PathBuf;
use tracing::info;

const PATH_COLOR: &str = "rgba(75, 192, 192, 0.1)";
const AVERAGE_COLOR: &str = "red";

//builds the overlaid line chart: faint paths plus a highlighted average
pub fn build_plot(result: &SimulationResult, title: &str) -> Plot {
    let mut plot = Plot::new();

    //paths start at day 0, the average starts at day 1
    let path_days: Vec<String> = (0..=result.num_days())
        .map(|day| format!("Day {}", day))
        .collect();

    for path in &result.paths {
        let trace = Scatter::new(path_days.clone(), path.clone())
            .mode(Mode::Lines)
            .line(Line::new().color(PATH_COLOR).width(1.0))
            .show_legend(false);
        plot.add_trace(trace);
    }

    let average = Scatter::new(result.day_labels(), result.average_path.clone())
        .mode(Mode::Lines)
        .name("Average Price")
        .line(Line::new().color(AVERAGE_COLOR).width(2.0))
        .show_legend(false);
    plot.add_trace(average);

    plot.set_layout(
        Layout::new()
            .title(title)
            .show_legend(false)
            .auto_size(true)
            .x_axis(Axis::new().title("Days"))
            .y_axis(Axis::new().title("Price (USD)")),
    );

    plot
}

//writes the chart to a standalone html file
#[derive(Debug, Clone)]
pub struct HtmlChartRenderer {
    pub output_path: PathBuf,
    pub title: String,
}

impl HtmlChartRenderer {
    pub fn new(output_path: PathBuf, title: impl Into<String>) -> Self {
        HtmlChartRenderer {
            output_path,
            title: title.into(),
        }
    }
}

impl ChartRenderer for HtmlChartRenderer {
    fn create(&mut self, result: &SimulationResult) -> Result<ChartHandle> {
        let plot = build_plot(result, &self.title);
        std::fs::write(&self.output_path, plot.to_html())
            .context(format!("Failed to write chart to {:?}", self.output_path))?;

        info!(path = ?self.output_path, paths = result.num_simulations(), "chart written");
        Ok(ChartHandle::new(self.output_path.clone()))
    }

    fn destroy(&mut self, handle: ChartHandle) -> Result<()> {
        remove_chart_file(&handle.path)
            .context(format!("Failed to remove chart {:?}", handle.path))
    }

    fn name(&self) -> &str {
        "html"
    }
}
