use crate::engine::SimulationResult;
use crate::render::{remove_chart_file, ChartHandle, ChartRenderer};
use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

//writes one row per day: day,label,average,path_0..path_n
//day 0 is the start price and has no average
pub fn write_paths_csv<W: Write>(result: &SimulationResult, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    let mut header = vec!["day".to_string(), "label".to_string(), "average".to_string()];
    header.extend((0..result.num_simulations()).map(|i| format!("path_{}", i)));
    csv_writer.write_record(&header)?;

    for day in 0..=result.num_days() {
        let average = if day == 0 {
            String::new()
        } else {
            result.average_path[day - 1].to_string()
        };

        let mut row = vec![day.to_string(), format!("Day {}", day), average];
        row.extend(result.paths.iter().map(|path| path[day].to_string()));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

//exports the chart data as csv instead of drawing it
#[derive(Debug, Clone)]
pub struct CsvChartRenderer {
    pub output_path: PathBuf,
}

impl CsvChartRenderer {
    pub fn new(output_path: PathBuf) -> Self {
        CsvChartRenderer { output_path }
    }
}

impl ChartRenderer for CsvChartRenderer {
    fn create(&mut self, result: &SimulationResult) -> Result<ChartHandle> {
        let file = std::fs::File::create(&self.output_path)
            .context(format!("Failed to create {:?}", self.output_path))?;
        write_paths_csv(result, file)?;

        info!(path = ?self.output_path, "paths csv written");
        Ok(ChartHandle::new(self.output_path.clone()))
    }

    fn destroy(&mut self, handle: ChartHandle) -> Result<()> {
        remove_chart_file(&handle.path)
            .context(format!("Failed to remove {:?}", handle.path))
    }

    fn name(&self) -> &str {
        "csv"
    }
}
