// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Procflow: Sankey diagrams for linear process flows (TUI + MCP + Plotly export).
//!
//! A process is typed as comma-separated steps with one non-negative flow value per
//! consecutive pair. [`build::build`] turns that form into either a halt message or a
//! [`model::SankeyGraph`], which [`render`] draws as text and [`format`] exports for Plotly.

pub mod build;
pub mod format;
pub mod layout;
pub mod mcp;
pub mod model;
pub mod render;
pub mod tui;
pub mod ui;
