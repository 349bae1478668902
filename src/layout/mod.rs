// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for text rendering.
//!
//! Computes cell coordinates for node boxes and link bands of a Sankey graph.

pub mod sankey;

pub use sankey::{
    layout_sankey, layout_sankey_with_options, LinkBand, NodeBox, SankeyLayoutError,
    SankeyLayoutOptions, SankeyTextLayout,
};
