pub mod csv_export;
pub mod html;

pub use csv_export::CsvChartRenderer;
pub use html::{build_plot, HtmlChartRenderer};

use crate::engine::SimulationResult;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

//handle to a rendered chart, needed to destroy it later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartHandle {
    pub path: PathBuf,
}

impl ChartHandle {
    pub fn new(path: PathBuf) -> Self {
        ChartHandle { path }
    }
}

//draws a simulation result as one line per path plus the average line
pub trait ChartRenderer {
    fn create(&mut self, result: &SimulationResult) -> Result<ChartHandle>;

    fn destroy(&mut self, handle: ChartHandle) -> Result<()>;

    fn name(&self) -> &str;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Box<R> {
    fn create(&mut self, result: &SimulationResult) -> Result<ChartHandle> {
        (**self).create(result)
    }

    fn destroy(&mut self, handle: ChartHandle) -> Result<()> {
        (**self).destroy(handle)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//removes a chart file, a file that is already gone is not an error
pub(crate) fn remove_chart_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

//holds the single "current chart" slot for a renderer
//the previous chart is destroyed before a new one is created
pub struct ChartSession<R: ChartRenderer> {
    renderer: R,
    current: Option<ChartHandle>,
}

impl<R: ChartRenderer> ChartSession<R> {
    pub fn new(renderer: R) -> Self {
        ChartSession {
            renderer,
            current: None,
        }
    }

    //session that owns a chart created by an earlier run
    pub fn resume(renderer: R, handle: ChartHandle) -> Self {
        ChartSession {
            renderer,
            current: Some(handle),
        }
    }

    //replaces the current chart with one for the given result
    //if rendering fails the slot stays empty
    pub fn show(&mut self, result: &SimulationResult) -> Result<&ChartHandle> {
        if let Some(previous) = self.current.take() {
            debug!(renderer = self.renderer.name(), path = ?previous.path, "destroying previous chart");
            self.renderer.destroy(previous)?;
        }

        let handle = self.renderer.create(result)?;
        Ok(&*self.current.insert(handle))
    }

    //destroys the current chart and clears the slot
    pub fn reset(&mut self) -> Result<()> {
        if let Some(handle) = self.current.take() {
            debug!(renderer = self.renderer.name(), path = ?handle.path, "resetting chart");
            self.renderer.destroy(handle)?;
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&ChartHandle> {
        self.current.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{simulate, SequenceRandom, SimulationParams};

    //records create/destroy calls instead of touching the filesystem
    #[derive(Default)]
    struct RecordingRenderer {
        created: usize,
        destroyed: Vec<PathBuf>,
        fail_next: bool,
    }

    impl ChartRenderer for RecordingRenderer {
        fn create(&mut self, _result: &SimulationResult) -> Result<ChartHandle> {
            if self.fail_next {
                self.fail_next = false;
                anyhow::bail!("render failed");
            }
            self.created += 1;
            Ok(ChartHandle::new(PathBuf::from(format!("chart-{}", self.created))))
        }

        fn destroy(&mut self, handle: ChartHandle) -> Result<()> {
            self.destroyed.push(handle.path);
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn sample_result() -> SimulationResult {
        let mut rng = SequenceRandom::first_index();
        simulate(100.0, &[0.01], &SimulationParams::new(3, 2), &mut rng).unwrap()
    }

    #[test]
    fn show_destroys_previous_chart() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        let result = sample_result();

        session.show(&result).unwrap();
        session.show(&result).unwrap();

        assert_eq!(session.current().unwrap().path, PathBuf::from("chart-2"));
        assert_eq!(session.renderer().destroyed, vec![PathBuf::from("chart-1")]);
    }

    #[test]
    fn reset_clears_the_slot() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        session.show(&sample_result()).unwrap();
        session.reset().unwrap();

        assert!(session.current().is_none());
        assert_eq!(session.renderer().destroyed.len(), 1);

        //resetting an empty session is a no-op
        session.reset().unwrap();
        assert_eq!(session.renderer().destroyed.len(), 1);
    }

    #[test]
    fn failed_render_leaves_no_stale_chart() {
        let mut session = ChartSession::new(RecordingRenderer::default());
        let result = sample_result();
        session.show(&result).unwrap();

        session.renderer.fail_next = true;
        assert!(session.show(&result).is_err());
        assert!(session.current().is_none());
        assert_eq!(session.renderer().destroyed, vec![PathBuf::from("chart-1")]);
    }

    #[test]
    fn resumed_session_destroys_adopted_chart() {
        let handle = ChartHandle::new(PathBuf::from("old.html"));
        let mut session = ChartSession::resume(RecordingRenderer::default(), handle);
        session.reset().unwrap();
        assert_eq!(session.renderer().destroyed, vec![PathBuf::from("old.html")]);
    }

    #[test]
    fn boxed_renderers_delegate() {
        let renderer: Box<dyn ChartRenderer> = Box::new(RecordingRenderer::default());
        let mut session = ChartSession::new(renderer);
        session.show(&sample_result()).unwrap();
        assert_eq!(session.renderer().name(), "recording");
    }
}
