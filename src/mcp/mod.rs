// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer lets agents read and edit the process form and fetch the resulting Sankey
//! diagram. Edits land in the same `UiState` the TUI renders from.

mod server;
mod types;

pub use server::ProcflowMcp;
