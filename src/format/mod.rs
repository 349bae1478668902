// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats: the comma-separated step list going in, and rendered/exported diagrams coming
//! out.

use std::fmt;
use std::str::FromStr;

use crate::model::SankeyGraph;
use crate::render::{render_sankey_unicode, SankeyRenderError};

pub mod labels;
pub mod plotly;

pub use labels::{join_steps, parse_steps};
pub use plotly::{export_plotly_html, export_plotly_json, export_plotly_value, PlotlyExportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    /// Picks a format from a file extension (`.json`, `.html`/`.htm`, anything else is text).
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "json" => Self::Json,
            Some(ext) if ext == "html" || ext == "htm" => Self::Html,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(ExportError::UnknownFormat(s.to_owned())),
        }
    }
}

pub fn export_graph(graph: &SankeyGraph, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => render_sankey_unicode(graph).map_err(ExportError::Render),
        ExportFormat::Json => export_plotly_json(graph).map_err(ExportError::Plotly),
        ExportFormat::Html => export_plotly_html(graph).map_err(ExportError::Plotly),
    }
}

#[derive(Debug)]
pub enum ExportError {
    UnknownFormat(String),
    Render(SankeyRenderError),
    Plotly(PlotlyExportError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(raw) => {
                write!(f, "unknown export format: {raw} (expected text, json, or html)")
            }
            Self::Render(err) => write!(f, "text render failed: {err}"),
            Self::Plotly(err) => write!(f, "plotly export failed: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownFormat(_) => None,
            Self::Render(err) => Some(err),
            Self::Plotly(err) => Some(err),
        }
    }
}
