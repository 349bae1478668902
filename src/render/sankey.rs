// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::smallvec;

use crate::layout::{layout_sankey_with_options, SankeyLayoutError, SankeyLayoutOptions};
use crate::model::{GraphRef, SankeyGraph};

use super::text::{canvas_to_string_trimmed, text_len};
use super::{
    clamp_highlight_index_to_text, AnnotatedRender, Canvas, CanvasError, HighlightIndex,
    LineSpans, SANKEY_BAND, SANKEY_EMPTY_LINK,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SankeyRenderError {
    Layout(SankeyLayoutError),
    Canvas(CanvasError),
}

impl fmt::Display for SankeyRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "sankey layout error: {err}"),
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl std::error::Error for SankeyRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Canvas(err) => Some(err),
        }
    }
}

impl From<SankeyLayoutError> for SankeyRenderError {
    fn from(value: SankeyLayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<CanvasError> for SankeyRenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}

pub fn render_sankey_unicode(graph: &SankeyGraph) -> Result<String, SankeyRenderError> {
    Ok(render_sankey_unicode_annotated(graph)?.text)
}

pub fn render_sankey_unicode_annotated(
    graph: &SankeyGraph,
) -> Result<AnnotatedRender, SankeyRenderError> {
    render_sankey_unicode_annotated_with_options(graph, SankeyLayoutOptions::default())
}

/// Draws node boxes with their labels, link bands between them, and each link value centered
/// under its band.
pub fn render_sankey_unicode_annotated_with_options(
    graph: &SankeyGraph,
    options: SankeyLayoutOptions,
) -> Result<AnnotatedRender, SankeyRenderError> {
    let layout = layout_sankey_with_options(graph, options)?;
    let mut canvas = Canvas::new(layout.width(), layout.height())?;
    let mut highlight_index = HighlightIndex::new();

    for (idx, node) in layout.nodes().iter().enumerate() {
        canvas.draw_box(node.x0, node.y0, node.x1, node.y1)?;
        canvas.write_str(node.label_x, node.label_y, &node.label)?;

        let spans = (node.y0..=node.y1).map(|y| (y, node.x0, node.x1)).collect::<LineSpans>();
        highlight_index.insert(GraphRef::Node(idx), spans);
    }

    for (idx, link) in layout.links().iter().enumerate() {
        let mut spans: LineSpans = smallvec![];
        if link.rows == 0 {
            canvas.fill_rect(link.x0, link.y0, link.x1, link.y0, SANKEY_EMPTY_LINK)?;
            spans.push((link.y0, link.x0, link.x1));
        } else {
            let y1 = link.y0 + link.rows - 1;
            canvas.fill_rect(link.x0, link.y0, link.x1, y1, SANKEY_BAND)?;
            spans.extend((link.y0..=y1).map(|y| (y, link.x0, link.x1)));
        }

        canvas.write_str(link.label_x, link.label_y, &link.value_label)?;
        let label_len = text_len(&link.value_label);
        if label_len > 0 {
            spans.push((link.label_y, link.label_x, link.label_x + label_len - 1));
        }
        highlight_index.insert(GraphRef::Link(idx), spans);
    }

    let text = canvas_to_string_trimmed(&canvas);
    clamp_highlight_index_to_text(&mut highlight_index, &text);
    Ok(AnnotatedRender { text, highlight_index })
}

#[cfg(test)]
mod tests {
    use super::{render_sankey_unicode, render_sankey_unicode_annotated_with_options};
    use crate::build::build_from_inputs;
    use crate::layout::SankeyLayoutOptions;
    use crate::model::{GraphRef, SankeyGraph};

    fn graph(steps: &str, values: &[f64]) -> SankeyGraph {
        build_from_inputs(steps, values.iter().copied()).graph().cloned().expect("graph")
    }

    fn compact() -> SankeyLayoutOptions {
        SankeyLayoutOptions { band_rows: 1, link_width: 3, ..SankeyLayoutOptions::default() }
    }

    #[test]
    fn renders_two_step_flow() {
        let render = render_sankey_unicode_annotated_with_options(&graph("A, B", &[1.0]), compact())
            .expect("render");

        assert_eq!(
            render.text,
            ["┌───┐   ┌───┐", "│ A │███│ B │", "└───┘   └───┘", "      1"].join("\n")
        );
    }

    #[test]
    fn zero_valued_link_renders_as_dotted_line() {
        let render = render_sankey_unicode_annotated_with_options(
            &graph("A, B, C", &[2.0, 0.0]),
            compact(),
        )
        .expect("render");
        let lines = render.text.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], "│ A │███│ B │···│ C │");
    }

    #[test]
    fn highlight_index_covers_nodes_and_links() {
        let render = render_sankey_unicode_annotated_with_options(&graph("A, B", &[1.0]), compact())
            .expect("render");

        let node = &render.highlight_index[&GraphRef::Node(1)];
        assert_eq!(node.as_slice(), &[(0, 8, 12), (1, 8, 12), (2, 8, 12)]);

        let link = &render.highlight_index[&GraphRef::Link(0)];
        assert_eq!(link.as_slice(), &[(1, 5, 7), (3, 6, 6)]);
    }

    #[test]
    fn default_render_keeps_labels_in_order() {
        let text = render_sankey_unicode(&graph("Raw, Processed, Shipped", &[10.0, 7.0]))
            .expect("render");
        let label_line = text.lines().nth(3).expect("label row");
        let raw = label_line.find("Raw").expect("Raw");
        let processed = label_line.find("Processed").expect("Processed");
        let shipped = label_line.find("Shipped").expect("Shipped");
        assert!(raw < processed && processed < shipped);
        assert!(text.lines().last().expect("values").contains("10"));
    }
}
