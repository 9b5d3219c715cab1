//! ECharts option builders, one per chart kind. Each takes the ranked
//! word counts plus per-call options and returns the option object the
//! browser-side library consumes.

use serde_json::{json, Value};

use crate::domain::RankedFrequencyMap;

use super::{ChartOptions, RenderError};

fn title(opts: &ChartOptions) -> Value {
    json!({ "text": opts.title })
}

fn name_value_items(data: &RankedFrequencyMap) -> Vec<Value> {
    data.iter()
        .map(|entry| json!({ "name": entry.word, "value": entry.count }))
        .collect()
}

fn category_axis(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "type": "category",
        "data": data.words(),
        "axisLabel": {
            "rotate": opts.axis_label_rotate,
            "fontSize": opts.axis_label_font_size,
        },
    })
}

pub fn word_cloud(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    let (min, max) = opts.word_size_range;
    json!({
        "title": title(opts),
        "tooltip": { "show": true },
        "series": [{
            "type": "wordCloud",
            "name": opts.series_name,
            "shape": "circle",
            "sizeRange": [min, max],
            "rotationRange": [-90, 90],
            "data": name_value_items(data),
        }],
    })
}

pub fn bar(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "title": title(opts),
        "tooltip": { "trigger": "axis" },
        "legend": { "data": [opts.series_name] },
        "xAxis": category_axis(data, opts),
        "yAxis": { "type": "value" },
        "series": [{
            "type": "bar",
            "name": opts.series_name,
            "data": data.counts(),
        }],
    })
}

pub fn line(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "title": title(opts),
        "tooltip": { "trigger": "axis" },
        "legend": { "data": [opts.series_name] },
        "xAxis": category_axis(data, opts),
        "yAxis": { "type": "value" },
        "series": [{
            "type": "line",
            "name": opts.series_name,
            "data": data.counts(),
            "markPoint": { "data": [{ "type": "max" }] },
        }],
    })
}

pub fn pie(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "title": title(opts),
        "tooltip": { "trigger": "item" },
        "legend": {
            "orient": "vertical",
            "top": "15%",
            "left": "2%",
            "data": data.words(),
        },
        "series": [{
            "type": "pie",
            "name": opts.series_name,
            "radius": "75%",
            "label": { "show": true, "formatter": "{b}: {c}" },
            "data": name_value_items(data),
        }],
    })
}

pub fn tree_map(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "title": title(opts),
        "tooltip": { "show": true },
        "series": [{
            "type": "treemap",
            "name": opts.series_name,
            "data": name_value_items(data),
        }],
    })
}

pub fn funnel(data: &RankedFrequencyMap, opts: &ChartOptions) -> Value {
    json!({
        "title": title(opts),
        "tooltip": { "trigger": "item" },
        "legend": { "data": data.words() },
        "series": [{
            "type": "funnel",
            "name": opts.series_name,
            "sort": "descending",
            "label": { "show": true, "position": "inside" },
            "data": name_value_items(data),
        }],
    })
}

/// Every axis shares the largest count as its maximum, so an empty map has
/// no usable scale.
pub fn radar(data: &RankedFrequencyMap, opts: &ChartOptions) -> Result<Value, RenderError> {
    let max = data.max_count().ok_or(RenderError::EmptyRadar)?;
    let indicators: Vec<Value> = data
        .iter()
        .map(|entry| json!({ "name": entry.word, "max": max }))
        .collect();

    Ok(json!({
        "title": title(opts),
        "tooltip": { "show": true },
        "legend": { "data": [opts.series_name] },
        "radar": [{ "indicator": indicators }],
        "series": [{
            "type": "radar",
            "name": opts.series_name,
            "label": { "show": false },
            "areaStyle": { "opacity": opts.area_opacity },
            "data": [{ "name": opts.series_name, "value": data.counts() }],
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        charts::ChartKind,
        config::ChartConfig,
        text::{aggregate, tokenizer::tokenize},
    };

    fn sample() -> RankedFrequencyMap {
        aggregate(&tokenize("cat dog cat bird cat dog"), 20)
    }

    fn opts(kind: ChartKind) -> ChartOptions {
        ChartOptions::for_kind(kind, &ChartConfig::default())
    }

    #[test]
    fn bar_uses_rotated_word_axis() {
        let option = bar(&sample(), &opts(ChartKind::Bar));
        assert_eq!(option["xAxis"]["data"], json!(["cat", "dog", "bird"]));
        assert_eq!(option["xAxis"]["axisLabel"]["rotate"], json!(-45));
        assert_eq!(option["xAxis"]["axisLabel"]["fontSize"], json!(12));
        assert_eq!(option["series"][0]["data"], json!([3, 2, 1]));
    }

    #[test]
    fn line_marks_maximum() {
        let option = line(&sample(), &opts(ChartKind::Line));
        assert_eq!(option["series"][0]["markPoint"]["data"][0]["type"], json!("max"));
        assert_eq!(option["series"][0]["type"], json!("line"));
    }

    #[test]
    fn pie_places_vertical_legend() {
        let option = pie(&sample(), &opts(ChartKind::Pie));
        assert_eq!(option["legend"]["orient"], json!("vertical"));
        assert_eq!(option["legend"]["top"], json!("15%"));
        assert_eq!(option["legend"]["left"], json!("2%"));
        assert_eq!(option["series"][0]["label"]["formatter"], json!("{b}: {c}"));
        assert_eq!(option["series"][0]["data"][0], json!({ "name": "cat", "value": 3 }));
    }

    #[test]
    fn word_cloud_and_funnel_carry_pairs() {
        let cloud = word_cloud(&sample(), &opts(ChartKind::WordCloud));
        assert_eq!(cloud["series"][0]["sizeRange"], json!([20, 100]));
        assert_eq!(cloud["series"][0]["data"].as_array().map(Vec::len), Some(3));

        let stages = funnel(&sample(), &opts(ChartKind::Funnel));
        assert_eq!(stages["series"][0]["label"]["position"], json!("inside"));
        assert_eq!(stages["series"][0]["data"][2], json!({ "name": "bird", "value": 1 }));
    }

    #[test]
    fn radar_axes_share_max_count() {
        let option = radar(&sample(), &opts(ChartKind::Radar)).unwrap();
        let indicators = option["radar"][0]["indicator"].as_array().unwrap();
        assert_eq!(indicators.len(), 3);
        assert!(indicators.iter().all(|i| i["max"] == json!(3)));
        assert_eq!(option["series"][0]["data"][0]["value"], json!([3, 2, 1]));
        assert_eq!(option["series"][0]["areaStyle"]["opacity"], json!(0.1));
    }

    #[test]
    fn radar_rejects_empty_map() {
        let err = radar(&RankedFrequencyMap::default(), &opts(ChartKind::Radar)).unwrap_err();
        assert!(matches!(err, RenderError::EmptyRadar));
    }

    #[test]
    fn tree_map_handles_empty_map() {
        let option = tree_map(&RankedFrequencyMap::default(), &opts(ChartKind::TreeMap));
        assert_eq!(option["series"][0]["data"], json!([]));
    }
}
