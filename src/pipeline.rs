use thiserror::Error;
use tracing::{debug, info};

use crate::{
    charts::{
        ChartArtifact, ChartKind, ChartRenderer, ChartRequest, RenderError,
        UnsupportedChartTypeError,
    },
    config::AnalysisConfig,
    domain::{PageText, RankedFrequencyMap},
    fetcher::{FetchError, PageFetcher},
    text::{aggregate, Tokenizer},
};

pub const FETCH_FAILURE_MESSAGE: &str = "could not retrieve page content; check the URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Dispatch,
    Fetch,
    Render,
    Present,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    UnsupportedChart(#[from] UnsupportedChartTypeError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) => Stage::Fetch,
            PipelineError::UnsupportedChart(_) => Stage::Dispatch,
            PipelineError::Render(_) => Stage::Render,
        }
    }

    /// Text shown to the user. Fetch failures all read the same; the
    /// detailed cause stays in the log.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Fetch(_) => FETCH_FAILURE_MESSAGE.to_string(),
            PipelineError::UnsupportedChart(err) => err.to_string(),
            PipelineError::Render(RenderError::EmptyRadar) => {
                "the page has no words to draw a radar chart from".to_string()
            }
            PipelineError::Render(err) => format!("could not draw the chart: {err}"),
        }
    }
}

/// Everything one successful run hands to the presentation layer.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub page_text: PageText,
    pub ranked: RankedFrequencyMap,
    pub artifact: ChartArtifact,
}

/// Fetch, tokenize, aggregate and render for one user action. Holds no
/// state between runs.
pub struct Pipeline<F, R> {
    fetcher: F,
    renderer: R,
    tokenizer: Tokenizer,
    top_k: usize,
}

impl<F, R> Pipeline<F, R>
where
    F: PageFetcher,
    R: ChartRenderer,
{
    pub fn new(fetcher: F, renderer: R, analysis: &AnalysisConfig) -> Self {
        Self {
            fetcher,
            renderer,
            tokenizer: Tokenizer::new(analysis.join_ideographs),
            top_k: analysis.top_k,
        }
    }

    /// The chart type is checked before the network is touched so a bad
    /// selection never costs a fetch.
    pub async fn run(&self, url: &str, chart_type: &str) -> Result<PipelineOutput, PipelineError> {
        let kind: ChartKind = chart_type.parse()?;

        let page_text = self.fetcher.fetch(url).await?;

        let tokens = self.tokenizer.tokenize(&page_text);
        debug!(target: "tokenize", tokens = tokens.len(), "page tokenized");

        let ranked = aggregate(&tokens, self.top_k);
        debug!(
            target: "aggregate",
            distinct = ranked.len(),
            top = ?ranked.iter().next().map(|e| (&e.word, e.count)),
            "frequencies ranked"
        );

        let request = ChartRequest::new(kind, ranked);
        if request.kind == ChartKind::Radar && request.data.is_empty() {
            return Err(RenderError::EmptyRadar.into());
        }
        let artifact = self.renderer.render(&request)?;

        info!(target: "app", url, chart = %kind, words = request.data.len(), "pipeline finished");
        Ok(PipelineOutput {
            page_text,
            ranked: request.data,
            artifact,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        future::Future,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use super::*;
    use crate::{
        charts::EchartsHtmlRenderer,
        config::{ChartConfig, FetchConfig},
        fetcher::HttpPageFetcher,
    };

    struct StaticPage(&'static str);

    impl PageFetcher for StaticPage {
        fn fetch(&self, _url: &str) -> impl Future<Output = Result<PageText, FetchError>> + Send {
            let text = PageText::new(self.0);
            async move { Ok(text) }
        }
    }

    struct CountingRenderer {
        calls: AtomicUsize,
        inner: EchartsHtmlRenderer,
    }

    impl ChartRenderer for CountingRenderer {
        fn render(&self, request: &ChartRequest) -> Result<ChartArtifact, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.render(request)
        }
    }

    fn pipeline<F: PageFetcher>(fetcher: F) -> Pipeline<F, CountingRenderer> {
        let renderer = CountingRenderer {
            calls: AtomicUsize::new(0),
            inner: EchartsHtmlRenderer::new(ChartConfig::default()),
        };
        Pipeline::new(fetcher, renderer, &AnalysisConfig::default())
    }

    #[tokio::test]
    async fn runs_all_stages() {
        let pipeline = pipeline(StaticPage("cat dog cat bird cat dog"));
        let output = pipeline.run("https://example.com", "bar").await.unwrap();

        let pairs: Vec<_> = output.ranked.iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("cat", 3), ("dog", 2), ("bird", 1)]);
        assert_eq!(output.page_text.as_str(), "cat dog cat bird cat dog");
        assert_eq!(output.artifact.kind, ChartKind::Bar);
    }

    #[tokio::test]
    async fn unknown_chart_type_renders_nothing() {
        let pipeline = pipeline(StaticPage("cat dog"));
        let err = pipeline.run("https://example.com", "unknown").await.unwrap_err();

        assert_eq!(err.stage(), Stage::Dispatch);
        assert!(matches!(err, PipelineError::UnsupportedChart(_)));
        assert_eq!(pipeline.renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_stops_before_rendering() {
        let fetcher = HttpPageFetcher::new(
            reqwest::Client::new(),
            FetchConfig {
                timeout: Duration::from_secs(2),
            },
        );
        let pipeline = pipeline(fetcher);
        let err = pipeline.run("http://127.0.0.1:1/", "pie").await.unwrap_err();

        assert_eq!(err.stage(), Stage::Fetch);
        assert!(matches!(err, PipelineError::Fetch(FetchError::Transport { .. })));
        assert_eq!(err.user_message(), FETCH_FAILURE_MESSAGE);
        assert!(err.to_string().contains("127.0.0.1"));
        assert_eq!(pipeline.renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_page_gives_empty_chart() {
        let pipeline = pipeline(StaticPage("1 2 3 ... !"));
        let output = pipeline.run("https://example.com", "funnel").await.unwrap();
        assert!(output.ranked.is_empty());
        assert_eq!(output.artifact.option["series"][0]["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn empty_page_radar_is_guarded() {
        let pipeline = pipeline(StaticPage(""));
        let err = pipeline.run("https://example.com", "radar").await.unwrap_err();
        assert_eq!(err.stage(), Stage::Render);
        assert!(matches!(err, PipelineError::Render(RenderError::EmptyRadar)));
        assert_eq!(pipeline.renderer.calls.load(Ordering::SeqCst), 0);
    }
}
