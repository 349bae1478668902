// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;

use crate::build::{build, build_from_inputs, BuildOutcome, HaltReason};
use crate::format::{export_graph, parse_steps, ExportFormat};
use crate::model::{FormState, PairKey, SankeyGraph};
use crate::render::render_sankey_unicode;
use crate::ui::UiState;

use super::types::*;

#[derive(Clone)]
pub struct ProcflowMcp {
    ui_state: Arc<Mutex<UiState>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ProcflowMcp {
    pub fn new(form: FormState) -> Self {
        Self::new_with_ui_state(Arc::new(Mutex::new(UiState::new(form))))
    }

    /// Serves the form shared with a running TUI.
    pub fn new_with_ui_state(ui_state: Arc<Mutex<UiState>>) -> Self {
        Self { ui_state, tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Read the live form: raw steps text, parsed steps, and one value per consecutive step
    /// pair; start here before editing with `form.set_steps`/`form.set_value`.
    #[tool(name = "form.read")]
    async fn form_read(&self) -> Result<Json<FormReadResponse>, ErrorData> {
        let state = self.ui_state.lock().await;
        let form = state.form();
        let steps = parse_steps(form.steps_input());
        let pairs = steps
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let key = PairKey::new(index);
                FormPair {
                    key: key.to_string(),
                    index: index as u64,
                    from: pair[0].to_string(),
                    to: pair[1].to_string(),
                    value: form.value(key).get(),
                }
            })
            .collect::<Vec<_>>();

        Ok(Json(FormReadResponse {
            steps_input: form.steps_input().to_owned(),
            steps: steps.iter().map(ToString::to_string).collect(),
            pairs,
            context: read_context(&state),
        }))
    }

    /// Replace the comma-separated steps text; values of pairs that still exist are kept, the
    /// rest are dropped. Returns the new build outcome.
    #[tool(name = "form.set_steps")]
    async fn form_set_steps(
        &self,
        params: Parameters<FormSetStepsParams>,
    ) -> Result<Json<FormMutationResponse>, ErrorData> {
        let FormSetStepsParams { steps_input } = params.0;

        let mut state = self.ui_state.lock().await;
        let before = state.form_rev();
        let form_rev = state.set_steps_input(steps_input);

        Ok(Json(FormMutationResponse {
            form_rev,
            changed: form_rev != before,
            outcome: outcome_summary(&build(state.form())),
        }))
    }

    /// Set the flow value of one step pair (by index); negative values are stored as zero.
    /// Call `form.read` first to see the pairs.
    #[tool(name = "form.set_value")]
    async fn form_set_value(
        &self,
        params: Parameters<FormSetValueParams>,
    ) -> Result<Json<FormSetValueResponse>, ErrorData> {
        let FormSetValueParams { index, value } = params.0;
        ensure_finite(&[value])?;

        let mut state = self.ui_state.lock().await;
        let key = PairKey::new(pair_index(index, state.form().pair_count())?);
        let stored = state.set_value(key, value);

        Ok(Json(FormSetValueResponse {
            key: key.to_string(),
            value: stored.get(),
            clamped: stored.get() != value,
            form_rev: state.form_rev(),
            outcome: outcome_summary(&build(state.form())),
        }))
    }

    /// Set all flow values at once, in pair order; pairs without an entry become zero.
    #[tool(name = "form.set_values")]
    async fn form_set_values(
        &self,
        params: Parameters<FormSetValuesParams>,
    ) -> Result<Json<FormMutationResponse>, ErrorData> {
        let FormSetValuesParams { values } = params.0;
        ensure_finite(&values)?;

        let mut state = self.ui_state.lock().await;
        let pair_count = state.form().pair_count();
        if values.len() > pair_count {
            return Err(ErrorData::invalid_params(
                "more values than step pairs",
                Some(serde_json::json!({ "values": values.len(), "pair_count": pair_count })),
            ));
        }

        let mut form = state.form().clone();
        for index in 0..pair_count {
            form.set_value(PairKey::new(index), values.get(index).copied().unwrap_or(0.0));
        }
        let before = state.form_rev();
        let form_rev = state.set_form(form);

        Ok(Json(FormMutationResponse {
            form_rev,
            changed: form_rev != before,
            outcome: outcome_summary(&build(state.form())),
        }))
    }

    /// Clear the steps text and every value.
    #[tool(name = "form.reset")]
    async fn form_reset(&self) -> Result<Json<FormMutationResponse>, ErrorData> {
        let mut state = self.ui_state.lock().await;
        let before = state.form_rev();
        let form_rev = state.reset_form();

        Ok(Json(FormMutationResponse {
            form_rev,
            changed: form_rev != before,
            outcome: outcome_summary(&build(state.form())),
        }))
    }

    /// Build a Sankey graph from ad-hoc inputs without touching the live form; values beyond
    /// the number of step pairs are ignored.
    #[tool(name = "sankey.build")]
    async fn sankey_build(
        &self,
        params: Parameters<SankeyBuildParams>,
    ) -> Result<Json<SankeyBuildResponse>, ErrorData> {
        let SankeyBuildParams { steps_input, values } = params.0;
        ensure_finite(&values)?;

        let outcome = build_from_inputs(&steps_input, values);
        Ok(Json(SankeyBuildResponse { outcome: outcome_summary(&outcome) }))
    }

    /// Build outcome of the live form: either a halt (with the message the user sees) or the
    /// graph's labels and link triples.
    #[tool(name = "sankey.current")]
    async fn sankey_current(&self) -> Result<Json<SankeyCurrentResponse>, ErrorData> {
        let state = self.ui_state.lock().await;
        let outcome = outcome_summary(&build(state.form()));
        Ok(Json(SankeyCurrentResponse { outcome, context: read_context(&state) }))
    }

    /// Render the live form's diagram as Unicode text (the TUI preview); halts return the
    /// message instead.
    #[tool(name = "sankey.render_text")]
    async fn sankey_render_text(&self) -> Result<Json<SankeyRenderTextResponse>, ErrorData> {
        let state = self.ui_state.lock().await;
        let context = read_context(&state);

        match build(state.form()) {
            BuildOutcome::Graph(graph) => {
                let text = render_sankey_unicode(&graph).map_err(|err| {
                    ErrorData::internal_error(format!("render error: {err}"), None)
                })?;
                Ok(Json(SankeyRenderTextResponse { text: Some(text), halt: None, context }))
            }
            BuildOutcome::Halt(reason) => Ok(Json(SankeyRenderTextResponse {
                text: None,
                halt: Some(halt_summary(reason)),
                context,
            })),
        }
    }

    /// Export the live form's diagram as a Plotly figure (`json`, default) or a standalone
    /// HTML page (`html`).
    #[tool(name = "sankey.export_plotly")]
    async fn sankey_export_plotly(
        &self,
        params: Parameters<SankeyExportPlotlyParams>,
    ) -> Result<Json<SankeyExportPlotlyResponse>, ErrorData> {
        let format = plotly_format(params.0.format.as_deref())?;

        let state = self.ui_state.lock().await;
        let context = read_context(&state);
        let graph = match build(state.form()) {
            BuildOutcome::Graph(graph) => graph,
            BuildOutcome::Halt(reason) => return Err(halt_error(reason)),
        };
        drop(state);

        let content = export_plotly_content(&graph, format)?;
        Ok(Json(SankeyExportPlotlyResponse { format: format.to_string(), content, context }))
    }
}

#[tool_handler]
impl ServerHandler for ProcflowMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Procflow Sankey builder server: a process is a comma-separated list of steps with one non-negative flow value per consecutive pair (tools: form.read, form.set_steps, form.set_value, form.set_values, form.reset, sankey.build, sankey.current, sankey.render_text, sankey.export_plotly)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Mapping helpers for MCP tool handlers.
include!("server/helpers.rs");
