use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub fetch: FetchConfig,
    pub analysis: AnalysisConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub top_k: usize,
    pub join_ideographs: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            join_ideographs: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub height: u32,
    pub radar_height: u32,
    pub echarts_js_url: String,
    pub wordcloud_js_url: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 1000,
            radar_height: 500,
            echarts_js_url: DEFAULT_ECHARTS_JS_URL.to_string(),
            wordcloud_js_url: DEFAULT_WORDCLOUD_JS_URL.to_string(),
        }
    }
}

pub const DEFAULT_TOP_K: usize = 20;
pub const DEFAULT_ECHARTS_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";
pub const DEFAULT_WORDCLOUD_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts-wordcloud@2/dist/echarts-wordcloud.min.js";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
