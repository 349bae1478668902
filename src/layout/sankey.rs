// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{FlowValue, SankeyGraph};
use crate::render::text::{text_len, truncate_with_ellipsis};

pub const DEFAULT_BAND_ROWS: usize = 5;
pub const DEFAULT_LINK_WIDTH: usize = 10;
pub const DEFAULT_MAX_LABEL_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SankeyLayoutOptions {
    /// Rows used by the thickest link band; every node box is this tall plus its borders.
    pub band_rows: usize,
    /// Columns between two node boxes.
    pub link_width: usize,
    /// Node labels longer than this are truncated with `…`.
    pub max_label_width: usize,
}

impl Default for SankeyLayoutOptions {
    fn default() -> Self {
        Self {
            band_rows: DEFAULT_BAND_ROWS,
            link_width: DEFAULT_LINK_WIDTH,
            max_label_width: DEFAULT_MAX_LABEL_WIDTH,
        }
    }
}

/// Left-to-right cell layout of a linear Sankey graph.
///
/// Row 0 and row `band_rows + 1` hold node box borders; link bands live strictly between them.
/// The last row carries the value label of each link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SankeyTextLayout {
    width: usize,
    height: usize,
    nodes: Vec<NodeBox>,
    links: Vec<LinkBand>,
}

impl SankeyTextLayout {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nodes(&self) -> &[NodeBox] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkBand] {
        &self.links
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBox {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
    pub label: String,
    pub label_x: usize,
    pub label_y: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBand {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    /// Band thickness in rows; `0` for a zero-valued link.
    pub rows: usize,
    pub value_label: String,
    pub label_x: usize,
    pub label_y: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SankeyLayoutError {
    EmptyGraph,
    ZeroBandRows,
    ZeroLinkWidth,
    ZeroLabelWidth,
}

impl std::fmt::Display for SankeyLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGraph => f.write_str("graph has no nodes"),
            Self::ZeroBandRows => f.write_str("band_rows must be at least 1"),
            Self::ZeroLinkWidth => f.write_str("link_width must be at least 1"),
            Self::ZeroLabelWidth => f.write_str("max_label_width must be at least 1"),
        }
    }
}

impl std::error::Error for SankeyLayoutError {}

pub fn layout_sankey(graph: &SankeyGraph) -> Result<SankeyTextLayout, SankeyLayoutError> {
    layout_sankey_with_options(graph, SankeyLayoutOptions::default())
}

/// Places node boxes left to right with one link gap between neighbours.
///
/// Band thickness is proportional to the link value relative to the largest value, rounded,
/// and at least one row for any non-zero value.
pub fn layout_sankey_with_options(
    graph: &SankeyGraph,
    options: SankeyLayoutOptions,
) -> Result<SankeyTextLayout, SankeyLayoutError> {
    if graph.node_count() == 0 {
        return Err(SankeyLayoutError::EmptyGraph);
    }
    if options.band_rows == 0 {
        return Err(SankeyLayoutError::ZeroBandRows);
    }
    if options.link_width == 0 {
        return Err(SankeyLayoutError::ZeroLinkWidth);
    }
    if options.max_label_width == 0 {
        return Err(SankeyLayoutError::ZeroLabelWidth);
    }

    let band_rows = options.band_rows;
    let box_bottom = band_rows + 1;
    let label_row = box_bottom + 1;
    let max_value = graph
        .links()
        .value()
        .iter()
        .copied()
        .fold(FlowValue::ZERO, |acc, value| if value > acc { value } else { acc });

    let mut nodes = Vec::with_capacity(graph.node_count());
    let mut x = 0usize;
    for step in graph.nodes().labels() {
        let label = truncate_with_ellipsis(step.label(), options.max_label_width);
        // One space of padding on each side of the label.
        let inner = text_len(&label) + 2;
        let x0 = x;
        let x1 = x0 + inner + 1;
        nodes.push(NodeBox {
            x0,
            x1,
            y0: 0,
            y1: box_bottom,
            label,
            label_x: x0 + 2,
            label_y: 1 + (band_rows - 1) / 2,
        });
        x = x1 + 1 + options.link_width;
    }

    let links = graph
        .links()
        .iter()
        .filter_map(|(source, target, value)| {
            let from = nodes.get(source)?;
            let to = nodes.get(target)?;
            let x0 = from.x1 + 1;
            let x1 = to.x0.checked_sub(1)?;
            let rows = band_rows_for(value, max_value, band_rows);
            let gap = x1 + 1 - x0;
            let value_label = truncate_with_ellipsis(&value.to_string(), gap);
            let label_x = x0 + (gap - text_len(&value_label)) / 2;
            Some(LinkBand {
                x0,
                x1,
                y0: 1 + (band_rows - rows.max(1)) / 2,
                rows,
                value_label,
                label_x,
                label_y: label_row,
            })
        })
        .collect::<Vec<_>>();

    let width = nodes.last().map(|node| node.x1 + 1).unwrap_or(0);
    Ok(SankeyTextLayout { width, height: label_row + 1, nodes, links })
}

fn band_rows_for(value: FlowValue, max_value: FlowValue, band_rows: usize) -> usize {
    if value.is_zero() || max_value.is_zero() {
        return 0;
    }
    let scaled = (value.get() / max_value.get() * band_rows as f64).round() as usize;
    scaled.clamp(1, band_rows)
}

#[cfg(test)]
mod tests {
    use super::{layout_sankey, layout_sankey_with_options, SankeyLayoutError, SankeyLayoutOptions};
    use crate::build::build_from_inputs;
    use crate::model::SankeyGraph;

    fn graph(steps: &str, values: &[f64]) -> SankeyGraph {
        build_from_inputs(steps, values.iter().copied()).graph().cloned().expect("graph")
    }

    #[test]
    fn boxes_are_placed_left_to_right_with_link_gaps() {
        let layout = layout_sankey(&graph("Raw, Processed", &[10.0])).expect("layout");

        let raw = &layout.nodes()[0];
        let processed = &layout.nodes()[1];
        // "│ Raw │" is 7 cells wide.
        assert_eq!((raw.x0, raw.x1), (0, 6));
        assert_eq!(processed.x0, 6 + 1 + 10);
        assert_eq!(layout.width(), processed.x1 + 1);
        assert_eq!(layout.height(), 5 + 3);

        let link = &layout.links()[0];
        assert_eq!((link.x0, link.x1), (7, 16));
        assert_eq!(link.rows, 5);
        assert_eq!(link.value_label, "10");
    }

    #[test]
    fn band_thickness_is_proportional_to_value() {
        let layout = layout_sankey(&graph("A, B, C, D", &[10.0, 5.0, 0.1])).expect("layout");
        let rows = layout.links().iter().map(|link| link.rows).collect::<Vec<_>>();
        assert_eq!(rows, vec![5, 3, 1]);
    }

    #[test]
    fn zero_valued_links_have_no_band() {
        let layout = layout_sankey(&graph("A, B, C", &[4.0, 0.0])).expect("layout");
        assert_eq!(layout.links()[1].rows, 0);
        assert_eq!(layout.links()[1].value_label, "0");
    }

    #[test]
    fn long_labels_are_truncated() {
        let options = SankeyLayoutOptions { max_label_width: 4, ..SankeyLayoutOptions::default() };
        let layout = layout_sankey_with_options(&graph("Warehouse, B", &[1.0]), options)
            .expect("layout");
        assert_eq!(layout.nodes()[0].label, "War…");
    }

    #[test]
    fn wide_value_labels_are_clipped_to_the_gap() {
        let options = SankeyLayoutOptions { link_width: 3, ..SankeyLayoutOptions::default() };
        let layout =
            layout_sankey_with_options(&graph("A, B", &[123456.0]), options).expect("layout");
        assert_eq!(layout.links()[0].value_label, "12…");
    }

    #[test]
    fn rejects_degenerate_options() {
        let g = graph("A, B", &[1.0]);
        let options = SankeyLayoutOptions { band_rows: 0, ..SankeyLayoutOptions::default() };
        assert_eq!(
            layout_sankey_with_options(&g, options).unwrap_err(),
            SankeyLayoutError::ZeroBandRows
        );
    }
}
