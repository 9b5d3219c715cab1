use std::path::PathBuf;

use anyhow::Result;

use crate::{
    charts::{ChartArtifact, ChartKind},
    domain::{PageText, RankedFrequencyMap},
    pipeline::PipelineOutput,
};

pub mod artifacts;
pub mod console;

pub use artifacts::ArtifactStore;
pub use console::ConsoleSink;

/// Where a chart ended up once the sink took ownership of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptChart {
    pub kind: ChartKind,
    pub title: String,
    pub location: PathBuf,
}

/// Display side of the tool. Owns chart artifacts once they are handed over.
pub trait PresentationSink {
    /// Stores the artifact without displaying anything.
    fn keep_chart(&mut self, artifact: ChartArtifact) -> Result<KeptChart>;
    fn show_page_text(&mut self, text: &PageText) -> Result<()>;
    fn show_statistics(&mut self, ranked: &RankedFrequencyMap) -> Result<()>;
    fn show_chart(&mut self, chart: &KeptChart) -> Result<()>;
    fn show_failure(&mut self, message: &str) -> Result<()>;

    /// Hands over a finished run. The chart is stored first, so a failed
    /// store leaves nothing half shown.
    fn present(&mut self, output: PipelineOutput) -> Result<()> {
        let chart = self.keep_chart(output.artifact)?;
        self.show_page_text(&output.page_text)?;
        self.show_statistics(&output.ranked)?;
        self.show_chart(&chart)
    }
}
