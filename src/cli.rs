use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use crate::{
    charts::ChartKind,
    config::{env::ConfigError, AppConfig},
};

#[derive(Debug, Parser)]
#[command(
    name = "wordfreq-charts",
    version,
    about = "Count the words on a web page and chart the most frequent ones"
)]
pub struct Cli {
    /// Page to analyse. Without it the tool asks for pages interactively.
    #[arg(short, long)]
    pub url: Option<String>,

    /// word-cloud, bar, line, pie, tree-map, funnel or radar.
    #[arg(short, long, default_value = "word-cloud")]
    pub chart: String,

    /// Number of most frequent words to keep.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Directory for generated chart pages (overrides OUTPUT_DIR).
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Do not print the extracted page text.
    #[arg(long)]
    pub no_text: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(top_k) = self.top_k {
            if top_k == 0 {
                return Err(ConfigError::Invalid("--top-k", top_k.to_string()));
            }
            config.analysis.top_k = top_k;
        }
        if let Some(dir) = &self.output_dir {
            config.directories.output_dir = dir.clone();
        }
        Ok(())
    }
}

/// Line-oriented question/answer over an async reader. Ctrl-C or end of
/// input ends the conversation.
pub struct Prompt<R> {
    lines: Lines<BufReader<R>>,
}

impl Prompt<tokio::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}");
        io::stdout().flush()?;
        tokio::select! {
            line = self.lines.next_line() => Ok(line?.map(|l| l.trim().to_string())),
            _ = tokio::signal::ctrl_c() => {
                println!();
                Ok(None)
            }
        }
    }

    /// Re-asks until the answer names a chart; an empty answer keeps `current`.
    pub async fn choose_chart(&mut self, current: ChartKind) -> Result<Option<ChartKind>> {
        for (index, kind) in ChartKind::ALL.iter().enumerate() {
            println!("  {}) {} ({})", index + 1, kind.id(), kind.label());
        }
        loop {
            let Some(answer) = self.ask(&format!("Chart type [{current}]: ")).await? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(current));
            }
            match parse_choice(&answer) {
                Some(kind) => return Ok(Some(kind)),
                None => println!("unknown chart type {answer:?}"),
            }
        }
    }
}

/// Accepts a 1-based menu number, an id like `tree-map` or a menu label.
pub fn parse_choice(answer: &str) -> Option<ChartKind> {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| ChartKind::ALL.get(index).copied())
        .or_else(|| answer.parse().ok())
}
