use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::RankedFrequencyMap;

pub mod dispatch;
pub mod echarts;
pub mod options;
pub mod renderer;

pub use options::ChartOptions;
pub use renderer::{ChartRenderer, EchartsHtmlRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    WordCloud,
    Bar,
    Line,
    Pie,
    TreeMap,
    Funnel,
    Radar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::WordCloud,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::TreeMap,
        ChartKind::Funnel,
        ChartKind::Radar,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::WordCloud => "word-cloud",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::TreeMap => "tree-map",
            ChartKind::Funnel => "funnel",
            ChartKind::Radar => "radar",
        }
    }

    /// Chinese menu label, accepted as an alias when parsing.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::WordCloud => "词云",
            ChartKind::Bar => "柱形图",
            ChartKind::Line => "折线图",
            ChartKind::Pie => "饼图",
            ChartKind::TreeMap => "矩形树图",
            ChartKind::Funnel => "漏斗图",
            ChartKind::Radar => "雷达图",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = UnsupportedChartTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted) || kind.label() == wanted)
            .ok_or_else(|| UnsupportedChartTypeError(raw.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported chart type {0:?}")]
pub struct UnsupportedChartTypeError(pub String);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("radar chart needs at least one word")]
    EmptyRadar,
    #[error("failed to encode chart option: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One render call's input. Built per user action and dropped afterwards.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub data: RankedFrequencyMap,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, data: RankedFrequencyMap) -> Self {
        Self { kind, data }
    }
}

#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub id: Uuid,
    pub kind: ChartKind,
    pub title: String,
    pub height: u32,
    pub option: serde_json::Value,
    pub html: String,
    pub rendered_at: DateTime<Utc>,
}
