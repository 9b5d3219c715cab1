use std::io::Write;

use anyhow::Result;

use crate::{
    charts::ChartArtifact,
    domain::{PageText, RankedFrequencyMap},
};

use super::{ArtifactStore, KeptChart, PresentationSink};

pub struct ConsoleSink<W: Write> {
    out: W,
    store: ArtifactStore,
    show_text: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, store: ArtifactStore, show_text: bool) -> Self {
        Self {
            out,
            store,
            show_text,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for ConsoleSink<W> {
    fn keep_chart(&mut self, artifact: ChartArtifact) -> Result<KeptChart> {
        let location = self.store.save(&artifact)?;
        Ok(KeptChart {
            kind: artifact.kind,
            title: artifact.title,
            location,
        })
    }

    fn show_page_text(&mut self, text: &PageText) -> Result<()> {
        if !self.show_text {
            return Ok(());
        }
        writeln!(self.out, "Page text:")?;
        writeln!(self.out, "{}", text.as_str())?;
        writeln!(self.out)?;
        Ok(())
    }

    fn show_statistics(&mut self, ranked: &RankedFrequencyMap) -> Result<()> {
        if ranked.is_empty() {
            writeln!(self.out, "Keyword statistics:")?;
            writeln!(self.out, "(no words found)")?;
            return Ok(());
        }
        writeln!(
            self.out,
            "Keyword statistics (top {}, {} occurrences):",
            ranked.len(),
            ranked.total()
        )?;
        for entry in ranked {
            writeln!(self.out, "{}: {}", entry.word, entry.count)?;
        }
        Ok(())
    }

    fn show_chart(&mut self, chart: &KeptChart) -> Result<()> {
        writeln!(self.out, "{} saved to {}", chart.title, chart.location.display())?;
        self.out.flush()?;
        Ok(())
    }

    fn show_failure(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "Error: {message}")?;
        self.out.flush()?;
        Ok(())
    }
}
