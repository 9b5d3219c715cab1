use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::ChartConfig;

use super::{dispatch, ChartArtifact, ChartOptions, ChartRequest, RenderError};

/// Turns a chart request into something the presentation layer can show.
pub trait ChartRenderer {
    fn render(&self, request: &ChartRequest) -> Result<ChartArtifact, RenderError>;
}

/// Produces standalone HTML pages that draw the chart with ECharts.
#[derive(Debug, Clone)]
pub struct EchartsHtmlRenderer {
    config: ChartConfig,
}

impl EchartsHtmlRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }
}

impl ChartRenderer for EchartsHtmlRenderer {
    fn render(&self, request: &ChartRequest) -> Result<ChartArtifact, RenderError> {
        let opts = ChartOptions::for_kind(request.kind, &self.config);
        let option = dispatch::build_option(request, &opts)?;
        let id = Uuid::new_v4();
        let html = page(&id, &opts, &serde_json::to_string(&option)?);

        debug!(
            target: "chart",
            kind = %request.kind,
            entries = request.data.len(),
            artifact = %id,
            "chart rendered"
        );

        Ok(ChartArtifact {
            id,
            kind: request.kind,
            title: opts.title,
            height: opts.height,
            option,
            html,
            rendered_at: Utc::now(),
        })
    }
}

fn page(id: &Uuid, opts: &ChartOptions, option_json: &str) -> String {
    let dom_id = id.simple().to_string();
    let scripts: String = opts
        .scripts
        .iter()
        .map(|src| format!("<script type=\"text/javascript\" src=\"{}\"></script>\n", escape_html(src)))
        .collect();
    // `</` inside an inline script would close the tag early.
    let option_json = option_json.replace("</", "<\\/");

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n\
         {scripts}\
         </head>\n\
         <body>\n\
         <div id=\"{dom_id}\" style=\"width:900px;height:{height}px;\"></div>\n\
         <script>\n\
         var chart_{dom_id} = echarts.init(document.getElementById('{dom_id}'), 'white', {{renderer: 'canvas'}});\n\
         var option_{dom_id} = {option_json};\n\
         chart_{dom_id}.setOption(option_{dom_id});\n\
         </script>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&opts.title),
        height = opts.height,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
