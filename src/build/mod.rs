// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Form state to Sankey graph.
//!
//! One render pass is `parse -> collect -> assemble`, evaluated from scratch for the current
//! form contents. Incomplete input is not an error: the pass stops with a [`HaltReason`] that
//! carries the prompt to show instead of a diagram.

use std::fmt;

use crate::format::labels::parse_steps;
use crate::model::{
    FlowValue, FormState, PairKey, ProcessFlow, ProcessFlowError, SankeyGraph, SankeyLinks,
    SankeyNodes, Step,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltSeverity {
    Info,
    Warning,
}

impl HaltSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Why a render pass stopped before producing a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// No step labels yet.
    EmptyInput,
    /// Fewer than two step labels.
    InsufficientSteps,
    /// Every flow value is still zero.
    AllZeroValues,
}

impl HaltReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::InsufficientSteps => "insufficient_steps",
            Self::AllZeroValues => "all_zero_values",
        }
    }

    pub fn severity(self) -> HaltSeverity {
        match self {
            Self::EmptyInput | Self::AllZeroValues => HaltSeverity::Info,
            Self::InsufficientSteps => HaltSeverity::Warning,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyInput => "Type at least two steps separated by commas to get started.",
            Self::InsufficientSteps => {
                "Please enter at least two steps (e.g. Step 1, Step 2, Step 3)."
            }
            Self::AllZeroValues => "Enter values greater than 0 to generate the Sankey diagram.",
        }
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Halt(HaltReason),
    Graph(SankeyGraph),
}

impl BuildOutcome {
    pub fn graph(&self) -> Option<&SankeyGraph> {
        match self {
            Self::Graph(graph) => Some(graph),
            Self::Halt(_) => None,
        }
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self {
            Self::Halt(reason) => Some(*reason),
            Self::Graph(_) => None,
        }
    }
}

/// Runs a full render pass over `form`.
pub fn build(form: &FormState) -> BuildOutcome {
    match process_flow_from_form(form) {
        Ok(flow) => BuildOutcome::Graph(graph_from_process_flow(&flow)),
        Err(reason) => BuildOutcome::Halt(reason),
    }
}

/// Builds a one-off form from a steps text and positional values, then runs [`build`].
///
/// Values beyond the number of step pairs are ignored; missing values read as zero.
pub fn build_from_inputs(steps_input: &str, values: impl IntoIterator<Item = f64>) -> BuildOutcome {
    build(&form_from_inputs(steps_input, values))
}

pub fn form_from_inputs(steps_input: &str, values: impl IntoIterator<Item = f64>) -> FormState {
    let mut form = FormState::new(steps_input);
    let pairs = form.pair_count();
    for (index, value) in values.into_iter().take(pairs).enumerate() {
        form.set_value(PairKey::new(index), value);
    }
    form
}

/// Parse and collect, stopping at the first halt state.
pub fn process_flow_from_form(form: &FormState) -> Result<ProcessFlow, HaltReason> {
    let steps = parse_steps(form.steps_input());
    if steps.is_empty() {
        return Err(HaltReason::EmptyInput);
    }
    if steps.len() < ProcessFlow::MIN_STEPS {
        return Err(HaltReason::InsufficientSteps);
    }

    let values = collect_flow_values(&steps, form);
    let flow = ProcessFlow::new(steps, values).map_err(|_| HaltReason::InsufficientSteps)?;
    if flow.is_all_zero() {
        return Err(HaltReason::AllZeroValues);
    }
    Ok(flow)
}

/// One value per consecutive step pair, read from the form's `value_{i}` fields.
pub fn collect_flow_values(steps: &[Step], form: &FormState) -> Vec<FlowValue> {
    let pairs = steps.len().saturating_sub(1);
    (0..pairs).map(|index| form.value(PairKey::new(index))).collect()
}

/// Assembles the linear-chain graph for `steps` and `values`.
///
/// Requires at least two steps and exactly `steps.len() - 1` values.
pub fn assemble_graph(
    steps: &[Step],
    values: &[FlowValue],
) -> Result<SankeyGraph, ProcessFlowError> {
    let flow = ProcessFlow::new(steps.to_vec(), values.to_vec())?;
    Ok(graph_from_process_flow(&flow))
}

pub fn graph_from_process_flow(flow: &ProcessFlow) -> SankeyGraph {
    let mut links = SankeyLinks::with_capacity(flow.flows().len());
    for edge in flow.flows() {
        links.push(edge.source(), edge.target(), edge.value());
    }
    SankeyGraph::new(SankeyNodes::new(flow.steps().to_vec()), links)
}
