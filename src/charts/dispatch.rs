use serde_json::Value;

use super::{echarts, ChartKind, ChartOptions, ChartRequest, RenderError};

/// Picks the option builder for the requested kind.
pub fn build_option(request: &ChartRequest, opts: &ChartOptions) -> Result<Value, RenderError> {
    let data = &request.data;
    let option = match request.kind {
        ChartKind::WordCloud => echarts::word_cloud(data, opts),
        ChartKind::Bar => echarts::bar(data, opts),
        ChartKind::Line => echarts::line(data, opts),
        ChartKind::Pie => echarts::pie(data, opts),
        ChartKind::TreeMap => echarts::tree_map(data, opts),
        ChartKind::Funnel => echarts::funnel(data, opts),
        ChartKind::Radar => echarts::radar(data, opts)?,
    };
    Ok(option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ChartConfig, domain::RankedFrequencyMap};

    #[test]
    fn every_kind_but_radar_accepts_empty_data() {
        let config = ChartConfig::default();
        for kind in ChartKind::ALL {
            let request = ChartRequest::new(kind, RankedFrequencyMap::default());
            let result = build_option(&request, &ChartOptions::for_kind(kind, &config));
            if kind == ChartKind::Radar {
                assert!(matches!(result, Err(RenderError::EmptyRadar)));
            } else {
                let option = result.unwrap_or_else(|err| panic!("{kind} failed: {err}"));
                assert!(option["series"].is_array(), "{kind} has no series");
            }
        }
    }
}
