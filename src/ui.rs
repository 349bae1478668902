// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared UI state for cross-component coordination.
//!
//! The interactive TUI and programmatic integrations (MCP) edit the same form. Each side bumps
//! `form_rev` when it changes the form; the other side picks up the new contents on its next
//! tick.

use std::fmt;

use crate::model::{FlowValue, FormState, PairKey};

/// A single input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Steps,
    Value(PairKey),
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steps => f.write_str("steps"),
            Self::Value(key) => write!(f, "{key}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    rev: u64,
    form_rev: u64,
    form: FormState,
    human_focus: Option<FormField>,
}

impl UiState {
    pub fn new(form: FormState) -> Self {
        Self { form, ..Self::default() }
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn form_rev(&self) -> u64 {
        self.form_rev
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn human_focus(&self) -> Option<FormField> {
        self.human_focus
    }

    /// Replaces the whole form. Returns the form revision after the call.
    pub fn set_form(&mut self, form: FormState) -> u64 {
        if self.form != form {
            self.form = form;
            self.bump_form_rev();
        }
        self.form_rev
    }

    pub fn set_steps_input(&mut self, raw: impl Into<String>) -> u64 {
        if self.form.set_steps_input(raw) {
            self.bump_form_rev();
        }
        self.form_rev
    }

    pub fn set_value(&mut self, key: PairKey, raw: f64) -> FlowValue {
        let previous = self.form.value(key);
        let value = self.form.set_value(key, raw);
        if previous != value {
            self.bump_form_rev();
        }
        value
    }

    pub fn reset_form(&mut self) -> u64 {
        self.set_form(FormState::default())
    }

    pub fn set_human_focus(&mut self, focus: Option<FormField>) {
        if self.human_focus == focus {
            return;
        }
        self.human_focus = focus;
        self.rev = self.rev.wrapping_add(1);
    }

    fn bump_form_rev(&mut self) {
        self.form_rev = self.form_rev.wrapping_add(1);
        self.rev = self.rev.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{FormField, UiState};
    use crate::model::{FormState, PairKey};

    #[test]
    fn form_edits_bump_both_revisions() {
        let mut state = UiState::default();
        assert_eq!(state.set_steps_input("A, B"), 1);
        state.set_value(PairKey::new(0), 4.0);
        assert_eq!(state.form_rev(), 2);
        assert_eq!(state.rev(), 2);
    }

    #[test]
    fn no_op_edits_keep_revisions() {
        let mut state = UiState::new(FormState::new("A, B"));
        state.set_steps_input("A, B");
        state.set_form(FormState::new("A, B"));
        state.set_value(PairKey::new(0), 0.0);
        state.set_value(PairKey::new(0), -1.0);
        assert_eq!(state.form_rev(), 0);
    }

    #[test]
    fn focus_changes_bump_rev_only() {
        let mut state = UiState::default();
        state.set_human_focus(Some(FormField::Value(PairKey::new(1))));
        state.set_human_focus(Some(FormField::Value(PairKey::new(1))));
        assert_eq!(state.rev(), 1);
        assert_eq!(state.form_rev(), 0);
        assert_eq!(FormField::Value(PairKey::new(1)).to_string(), "value_1");
    }
}
