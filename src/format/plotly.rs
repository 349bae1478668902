// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plotly figure export.
//!
//! The JSON shape is the one `Plotly.newPlot(el, data, layout)` consumes: a single `sankey`
//! trace plus a layout object.

use std::fmt;

use serde::Serialize;

use crate::model::SankeyGraph;

pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const PAGE_TITLE: &str = "Sankey Plot for Process Flow Generator";
const PLOT_ELEMENT_ID: &str = "procflow-sankey";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyFigure<'a> {
    pub data: [SankeyTrace<'a>; 1],
    pub layout: PlotlyLayout<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyTrace<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub node: SankeyTraceNode<'a>,
    pub link: SankeyTraceLink<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyTraceNode<'a> {
    pub label: Vec<&'a str>,
    pub pad: u32,
    pub thickness: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyTraceLink<'a> {
    pub source: &'a [usize],
    pub target: &'a [usize],
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyLayout<'a> {
    pub title: PlotlyTitle<'a>,
    pub font: PlotlyFont,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyTitle<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyFont {
    pub size: u32,
}

pub fn plotly_figure(graph: &SankeyGraph) -> PlotlyFigure<'_> {
    let nodes = graph.nodes();
    let links = graph.links();
    let layout = graph.layout();

    PlotlyFigure {
        data: [SankeyTrace {
            kind: "sankey",
            node: SankeyTraceNode {
                label: nodes.labels().iter().map(|step| step.label()).collect(),
                pad: nodes.pad(),
                thickness: nodes.thickness(),
            },
            link: SankeyTraceLink {
                source: links.source(),
                target: links.target(),
                value: links.value().iter().map(|value| value.get()).collect(),
            },
        }],
        layout: PlotlyLayout {
            title: PlotlyTitle { text: layout.title },
            font: PlotlyFont { size: layout.font_size },
            height: layout.height,
        },
    }
}

pub fn export_plotly_value(graph: &SankeyGraph) -> Result<serde_json::Value, PlotlyExportError> {
    serde_json::to_value(plotly_figure(graph)).map_err(PlotlyExportError::Serialize)
}

pub fn export_plotly_json(graph: &SankeyGraph) -> Result<String, PlotlyExportError> {
    serde_json::to_string_pretty(&plotly_figure(graph)).map_err(PlotlyExportError::Serialize)
}

/// Standalone HTML page that loads plotly.js from its CDN and draws the figure responsively.
pub fn export_plotly_html(graph: &SankeyGraph) -> Result<String, PlotlyExportError> {
    let figure =
        serde_json::to_string(&plotly_figure(graph)).map_err(PlotlyExportError::Serialize)?;
    // Labels are user text: no raw `<`, `>` or `&` may reach the inline script.
    let figure = escape_script_json(&figure);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
<script src="{PLOTLY_CDN_URL}"></script>
</head>
<body>
<div id="{PLOT_ELEMENT_ID}" style="width:100%;"></div>
<script>
const figure = {figure};
Plotly.newPlot("{PLOT_ELEMENT_ID}", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#
    ))
}

fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug)]
pub enum PlotlyExportError {
    Serialize(serde_json::Error),
}

impl fmt::Display for PlotlyExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize plotly figure: {err}"),
        }
    }
}

impl std::error::Error for PlotlyExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{export_plotly_html, export_plotly_json, export_plotly_value};
    use crate::build::assemble_graph;
    use crate::format::labels::parse_steps;
    use crate::model::{FlowValue, SankeyGraph};

    fn graph(raw: &str, values: &[f64]) -> SankeyGraph {
        let values = values.iter().map(|value| FlowValue::clamped(*value)).collect::<Vec<_>>();
        assemble_graph(&parse_steps(raw), &values).expect("graph")
    }

    #[test]
    fn figure_matches_plotly_sankey_shape() {
        let value = export_plotly_value(&graph("Raw, Processed, Shipped", &[10.0, 7.5]))
            .expect("figure");

        assert_eq!(
            value,
            serde_json::json!({
                "data": [{
                    "type": "sankey",
                    "node": { "label": ["Raw", "Processed", "Shipped"], "pad": 20, "thickness": 20 },
                    "link": { "source": [0, 1], "target": [1, 2], "value": [10.0, 7.5] }
                }],
                "layout": { "title": { "text": "Process Flow" }, "font": { "size": 12 }, "height": 500 }
            })
        );
    }

    #[test]
    fn json_export_is_parseable() {
        let json = export_plotly_json(&graph("A, B", &[1.0])).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["data"][0]["type"], "sankey");
    }

    #[test]
    fn html_export_embeds_figure_and_escapes_script_close() {
        let html = export_plotly_html(&graph("Start, </script><b>x, <!--<script>", &[2.0, 1.0]))
            .expect("html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Plotly.newPlot(\"procflow-sankey\""));
        assert!(html.contains(r"\u003c/script\u003e\u003cb\u003ex"));
        assert!(html.contains(r"\u003c!--\u003cscript\u003e"));
        assert!(!html.contains("<!--"));
        assert_eq!(html.matches("<script").count(), 2);
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn escaped_html_figure_still_parses_to_the_same_labels() {
        let graph = graph("Q&A, <Pack>", &[3.0]);
        let html = export_plotly_html(&graph).expect("html");
        let start = html.find("const figure = ").expect("figure") + "const figure = ".len();
        let end = start + html[start..].find(";\n").expect("end");
        let figure: serde_json::Value = serde_json::from_str(&html[start..end]).expect("parse");
        assert_eq!(figure, export_plotly_value(&graph).expect("figure"));
    }
}
