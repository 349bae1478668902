// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Step;

const SEPARATOR: u8 = b',';
const JOIN_SEPARATOR: &str = ", ";

/// Parses a comma-separated step list.
///
/// Tokens are trimmed; tokens that are empty after trimming are skipped. Order is preserved and
/// duplicate labels are kept as separate steps.
pub fn parse_steps(raw: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut start = 0usize;
    for comma in memchr::memchr_iter(SEPARATOR, raw.as_bytes()) {
        // `,` is ASCII, so `comma` is always a char boundary.
        push_token(&mut steps, &raw[start..comma]);
        start = comma + 1;
    }
    push_token(&mut steps, &raw[start..]);
    steps
}

fn push_token(steps: &mut Vec<Step>, token: &str) {
    if let Ok(step) = Step::new(token) {
        steps.push(step);
    }
}

/// Joins steps back into the text form accepted by [`parse_steps`].
pub fn join_steps(steps: &[Step]) -> String {
    let mut out = String::new();
    for (idx, step) in steps.iter().enumerate() {
        if idx > 0 {
            out.push_str(JOIN_SEPARATOR);
        }
        out.push_str(step.label());
    }
    out
}
