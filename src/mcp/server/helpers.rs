// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn read_context(state: &UiState) -> ReadContext {
    ReadContext {
        form_rev: state.form_rev(),
        ui_rev: state.rev(),
        human_focus: state.human_focus().map(|focus| focus.to_string()),
    }
}

fn halt_summary(reason: HaltReason) -> HaltSummary {
    HaltSummary {
        reason: reason.as_str().to_owned(),
        severity: reason.severity().as_str().to_owned(),
        message: reason.message().to_owned(),
    }
}

fn graph_summary(graph: &SankeyGraph) -> McpSankeyGraph {
    let links = graph.links();
    McpSankeyGraph {
        labels: graph.nodes().labels().iter().map(ToString::to_string).collect(),
        source: links.source().iter().map(|&idx| idx as u64).collect(),
        target: links.target().iter().map(|&idx| idx as u64).collect(),
        value: links.value().iter().map(|value| value.get()).collect(),
    }
}

fn outcome_summary(outcome: &BuildOutcome) -> BuildOutcomeSummary {
    match outcome {
        BuildOutcome::Halt(reason) => BuildOutcomeSummary {
            status: "halt".to_owned(),
            halt: Some(halt_summary(*reason)),
            graph: None,
        },
        BuildOutcome::Graph(graph) => BuildOutcomeSummary {
            status: "graph".to_owned(),
            halt: None,
            graph: Some(graph_summary(graph)),
        },
    }
}

fn halt_error(reason: HaltReason) -> ErrorData {
    ErrorData::invalid_request(
        reason.message(),
        Some(serde_json::json!({
            "reason": reason.as_str(),
            "severity": reason.severity().as_str(),
        })),
    )
}

fn ensure_finite(values: &[f64]) -> Result<(), ErrorData> {
    match values.iter().position(|value| !value.is_finite()) {
        None => Ok(()),
        Some(position) => Err(ErrorData::invalid_params(
            "values must be finite numbers",
            Some(serde_json::json!({ "position": position })),
        )),
    }
}

fn pair_index(index: u64, pair_count: usize) -> Result<usize, ErrorData> {
    usize::try_from(index).ok().filter(|&index| index < pair_count).ok_or_else(|| {
        ErrorData::invalid_params(
            "pair index out of range",
            Some(serde_json::json!({ "index": index, "pair_count": pair_count })),
        )
    })
}

fn plotly_format(raw: Option<&str>) -> Result<ExportFormat, ErrorData> {
    let format = match raw {
        None => ExportFormat::Json,
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|err| ErrorData::invalid_params(err.to_string(), None))?,
    };
    if format == ExportFormat::Text {
        return Err(ErrorData::invalid_params(
            "expected format 'json' or 'html'",
            Some(serde_json::json!({ "format": raw })),
        ));
    }
    Ok(format)
}

fn export_plotly_content(graph: &SankeyGraph, format: ExportFormat) -> Result<String, ErrorData> {
    export_graph(graph, format).map_err(|err| {
        ErrorData::internal_error(
            format!("export error: {err}"),
            Some(serde_json::json!({ "format": format.as_str() })),
        )
    })
}
