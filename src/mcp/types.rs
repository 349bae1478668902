// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Live state shared with the TUI at the time of a read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadContext {
    pub form_rev: u64,
    pub ui_rev: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_focus: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormPair {
    /// Field key, `value_{index}`.
    pub key: String,
    pub index: u64,
    pub from: String,
    pub to: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormReadResponse {
    pub steps_input: String,
    pub steps: Vec<String>,
    pub pairs: Vec<FormPair>,
    pub context: ReadContext,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FormSetStepsParams {
    /// Comma-separated step labels, e.g. `"Raw, Processed, Shipped"`.
    pub steps_input: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FormSetValueParams {
    /// Pair index: `0` is the flow from the first step to the second.
    pub index: u64,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FormSetValuesParams {
    /// Values in pair order. Pairs past the end of the list are set to zero.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HaltSummary {
    /// `empty_input`, `insufficient_steps` or `all_zero_values`.
    pub reason: String,
    /// `info` or `warning`.
    pub severity: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpSankeyGraph {
    pub labels: Vec<String>,
    pub source: Vec<u64>,
    pub target: Vec<u64>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildOutcomeSummary {
    /// `halt` or `graph`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halt: Option<HaltSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<McpSankeyGraph>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormMutationResponse {
    pub form_rev: u64,
    pub changed: bool,
    pub outcome: BuildOutcomeSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FormSetValueResponse {
    pub key: String,
    /// Stored value after clamping negatives to zero.
    pub value: f64,
    pub clamped: bool,
    pub form_rev: u64,
    pub outcome: BuildOutcomeSummary,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SankeyBuildParams {
    pub steps_input: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SankeyBuildResponse {
    pub outcome: BuildOutcomeSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SankeyCurrentResponse {
    pub outcome: BuildOutcomeSummary,
    pub context: ReadContext,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SankeyRenderTextResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halt: Option<HaltSummary>,
    pub context: ReadContext,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SankeyExportPlotlyParams {
    /// `json` (default) or `html`.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SankeyExportPlotlyResponse {
    pub format: String,
    pub content: String,
    pub context: ReadContext,
}
