// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use procflow::build::form_from_inputs;
use procflow::model::FormState;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    LargeLongLabels,
}

impl Case {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::LargeLongLabels];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeLongLabels => "large_long_labels",
        }
    }

    const fn params(self) -> (usize, usize) {
        // (steps, label length)
        match self {
            Self::Small => (4, 8),
            Self::Medium => (32, 12),
            Self::LargeLongLabels => (256, 40),
        }
    }
}

fn label(idx: usize, len: usize) -> String {
    let mut out = format!("Step {idx:04} ");
    while out.len() < len {
        out.push((b'a' + (out.len() % 26) as u8) as char);
    }
    out.truncate(len.max(9));
    out
}

/// Comma-separated steps text with irregular spacing, like hand-typed input.
pub fn steps_input(case: Case) -> String {
    let (steps, len) = case.params();
    (0..steps)
        .map(|idx| match idx % 3 {
            0 => label(idx, len),
            1 => format!("  {}", label(idx, len)),
            _ => format!("{} ", label(idx, len)),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Values decaying along the chain, never zero.
pub fn values(case: Case) -> Vec<f64> {
    let (steps, _) = case.params();
    (0..steps.saturating_sub(1)).map(|idx| 1000.0 / (idx as f64 + 1.0) + 0.5).collect()
}

pub fn form(case: Case) -> FormState {
    form_from_inputs(&steps_input(case), values(case))
}
