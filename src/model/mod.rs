// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A process flow is an ordered list of steps with one flow value per consecutive pair; the
//! Sankey graph is the renderer-facing description built from it.

pub mod flow_value;
pub mod form;
pub mod graph;
pub mod process_flow;
pub mod step;

pub use flow_value::{FlowValue, FlowValueError};
pub use form::{FormState, PairKey, ParsePairKeyError};
pub use graph::{
    FigureLayout, GraphRef, SankeyGraph, SankeyLinks, SankeyNodes, FIGURE_FONT_SIZE,
    FIGURE_HEIGHT, FIGURE_TITLE, NODE_PAD, NODE_THICKNESS,
};
pub use process_flow::{Flow, ProcessFlow, ProcessFlowError};
pub use step::{Step, StepError};
