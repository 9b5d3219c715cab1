use std::{
    io::{self, Stdout},
    process::ExitCode,
};

use anyhow::Result;
use reqwest::Client;
use tokio::io::AsyncRead;
use uuid::Uuid;

use crate::{
    charts::{ChartKind, ChartRenderer, EchartsHtmlRenderer},
    cli::Prompt,
    config::AppConfig,
    fetcher::{HttpPageFetcher, PageFetcher},
    infrastructure::directories::ResolvedPaths,
    pipeline::{Pipeline, Stage},
    presentation::{ArtifactStore, ConsoleSink, PresentationSink},
};

/// Result of one user action as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    Failed(Stage),
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Shown => ExitCode::SUCCESS,
            Outcome::Failed(Stage::Dispatch) => ExitCode::from(2),
            Outcome::Failed(_) => ExitCode::FAILURE,
        }
    }
}

pub struct WordChartApp<F, R, S> {
    pipeline: Pipeline<F, R>,
    sink: S,
}

impl WordChartApp<HttpPageFetcher, EchartsHtmlRenderer, ConsoleSink<Stdout>> {
    pub fn initialize(config: &AppConfig, paths: &ResolvedPaths, show_text: bool) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("wordfreq-charts/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let fetcher = HttpPageFetcher::new(http_client, config.fetch.clone());
        let renderer = EchartsHtmlRenderer::new(config.chart.clone());
        let pipeline = Pipeline::new(fetcher, renderer, &config.analysis);

        let session = Uuid::new_v4();
        let store = ArtifactStore::new(paths.output_dir.clone(), session);
        tracing::info!(
            target: "app",
            session = %session,
            output = %store.dir().display(),
            top_k = config.analysis.top_k,
            "session started"
        );

        Ok(Self::new(pipeline, ConsoleSink::new(io::stdout(), store, show_text)))
    }
}

impl<F, R, S> WordChartApp<F, R, S>
where
    F: PageFetcher,
    R: ChartRenderer,
    S: PresentationSink,
{
    pub fn new(pipeline: Pipeline<F, R>, sink: S) -> Self {
        Self { pipeline, sink }
    }

    /// Runs one action end to end. Stage failures, including a chart that
    /// could not be stored, are shown to the user and logged; only an error
    /// while reporting a failure is returned.
    pub async fn handle(&mut self, url: &str, chart_type: &str) -> Result<Outcome> {
        match self.pipeline.run(url, chart_type).await {
            Ok(output) => match self.sink.present(output) {
                Ok(()) => Ok(Outcome::Shown),
                Err(err) => {
                    tracing::error!(
                        target: "app",
                        error = %format!("{err:#}"),
                        url,
                        chart = chart_type,
                        "could not present result"
                    );
                    self.sink
                        .show_failure(&format!("could not save the chart: {err:#}"))?;
                    Ok(Outcome::Failed(Stage::Present))
                }
            },
            Err(err) => {
                let stage = err.stage();
                if stage == Stage::Dispatch {
                    tracing::error!(
                        target: "app",
                        error = %err,
                        chart = chart_type,
                        "chart type outside the supported set"
                    );
                } else {
                    tracing::warn!(
                        target: "app",
                        ?stage,
                        error = %err,
                        url,
                        chart = chart_type,
                        "run failed"
                    );
                }
                self.sink.show_failure(&err.user_message())?;
                Ok(Outcome::Failed(stage))
            }
        }
    }

    /// Asks for a URL and a chart type, generates, and repeats until an
    /// empty URL, end of input or Ctrl-C.
    pub async fn run_interactive<Rd: AsyncRead + Unpin>(
        &mut self,
        prompt: &mut Prompt<Rd>,
    ) -> Result<()> {
        let mut chart = ChartKind::WordCloud;
        loop {
            let Some(url) = prompt.ask("URL (empty to quit): ").await? else {
                break;
            };
            if url.is_empty() {
                break;
            }
            chart = match prompt.choose_chart(chart).await? {
                Some(kind) => kind,
                None => break,
            };
            self.handle(&url, chart.id()).await?;
        }
        tracing::info!(target: "app", "session ended");
        Ok(())
    }
}
