use std::{env, time::Duration};

use super::env::{
    AnalysisConfig, AppConfig, ChartConfig, ConfigError, DirectoryConfig, FetchConfig,
    LoggingConfig, DEFAULT_ECHARTS_JS_URL, DEFAULT_TOP_K, DEFAULT_WORDCLOUD_JS_URL,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "charts".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let fetch = FetchConfig {
            timeout: Duration::from_millis(parse_num("FETCH_TIMEOUT_MS").unwrap_or(10_000)),
        };

        let top_k = match env::var("TOP_K") {
            Ok(raw) => validate_top_k(&raw)?,
            Err(_) => DEFAULT_TOP_K,
        };
        let analysis = AnalysisConfig {
            top_k,
            join_ideographs: env::var("TOKENIZER_JOIN_IDEOGRAPHS")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
        };

        let chart = ChartConfig {
            height: parse_num("CHART_HEIGHT").unwrap_or(1000),
            radar_height: parse_num("RADAR_CHART_HEIGHT").unwrap_or(500),
            echarts_js_url: non_empty("ECHARTS_JS_URL")
                .unwrap_or_else(|| DEFAULT_ECHARTS_JS_URL.to_string()),
            wordcloud_js_url: non_empty("ECHARTS_WORDCLOUD_JS_URL")
                .unwrap_or_else(|| DEFAULT_WORDCLOUD_JS_URL.to_string()),
        };

        Ok(Self {
            directories,
            logging,
            fetch,
            analysis,
            chart,
        })
    }
}

pub(crate) fn validate_top_k(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::Invalid("TOP_K", raw.to_string())),
        Ok(value) => Ok(value),
    }
}

fn parse_num<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_rejects_zero_and_garbage() {
        assert!(validate_top_k("0").is_err());
        assert!(validate_top_k("twenty").is_err());
        assert_eq!(validate_top_k(" 5 ").unwrap(), 5);
    }
}
