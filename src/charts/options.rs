use crate::config::ChartConfig;

use super::ChartKind;

/// Presentation settings for a single render. Built fresh per call so
/// renders never share mutable defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub series_name: String,
    pub height: u32,
    pub axis_label_rotate: i32,
    pub axis_label_font_size: u32,
    pub word_size_range: (u32, u32),
    pub area_opacity: f64,
    pub scripts: Vec<String>,
}

impl ChartOptions {
    pub fn for_kind(kind: ChartKind, config: &ChartConfig) -> Self {
        let (title, series_name) = match kind {
            ChartKind::WordCloud => ("Word Cloud", ""),
            ChartKind::Bar => ("Word Frequency Bar Chart", "frequency"),
            ChartKind::Line => ("Word Frequency Line Chart", "frequency"),
            ChartKind::Pie => ("Word Frequency Pie Chart", ""),
            ChartKind::TreeMap => ("Tree Map", "Tree Map"),
            ChartKind::Funnel => ("Funnel", "Funnel"),
            ChartKind::Radar => ("Word Frequency Radar Chart", "frequency"),
        };

        let height = match kind {
            ChartKind::Radar => config.radar_height,
            _ => config.height,
        };

        let mut scripts = vec![config.echarts_js_url.clone()];
        if kind == ChartKind::WordCloud {
            scripts.push(config.wordcloud_js_url.clone());
        }

        Self {
            title: title.to_string(),
            series_name: series_name.to_string(),
            height,
            axis_label_rotate: -45,
            axis_label_font_size: 12,
            word_size_range: (20, 100),
            area_opacity: 0.1,
            scripts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radar_is_shorter_and_word_cloud_loads_extension() {
        let config = ChartConfig::default();
        let radar = ChartOptions::for_kind(ChartKind::Radar, &config);
        let bar = ChartOptions::for_kind(ChartKind::Bar, &config);
        let cloud = ChartOptions::for_kind(ChartKind::WordCloud, &config);

        assert_eq!(radar.height, 500);
        assert_eq!(bar.height, 1000);
        assert_eq!(bar.scripts, vec![config.echarts_js_url.clone()]);
        assert_eq!(cloud.scripts.len(), 2);
        assert_eq!(cloud.scripts[1], config.wordcloud_js_url);
    }
}
