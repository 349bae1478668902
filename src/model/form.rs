// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::FlowValue;
use crate::format::labels::parse_steps;

/// Key of the numeric field for the pair `(step[i], step[i + 1])`.
///
/// Rendered as `value_{i}`. Keys are positional so a value entered for pair `i` stays with
/// pair `i` when the label list is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(usize);

impl PairKey {
    const PREFIX: &'static str = "value_";

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for PairKey {
    type Err = ParsePairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(Self::PREFIX).ok_or(ParsePairKeyError)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePairKeyError);
        }
        digits.parse::<usize>().map(Self).map_err(|_| ParsePairKeyError)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePairKeyError;

impl fmt::Display for ParsePairKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a pair key like `value_0`")
    }
}

impl std::error::Error for ParsePairKeyError {}

/// Current contents of the input form.
///
/// Holds the raw comma-separated steps text plus the non-zero numeric fields. Every other field
/// reads as zero, so two forms showing the same inputs compare equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    steps_input: String,
    values: BTreeMap<PairKey, FlowValue>,
}

impl FormState {
    pub fn new(steps_input: impl Into<String>) -> Self {
        Self { steps_input: steps_input.into(), values: BTreeMap::new() }
    }

    pub fn steps_input(&self) -> &str {
        &self.steps_input
    }

    /// Replaces the steps text. Returns `false` if nothing changed.
    ///
    /// Fields for pairs that no longer exist are dropped; fields for surviving pair indices keep
    /// their values.
    pub fn set_steps_input(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.steps_input {
            return false;
        }
        self.steps_input = raw;
        let pairs = self.pair_count();
        self.values.retain(|key, _| key.index() < pairs);
        true
    }

    /// Number of consecutive step pairs the current steps text yields.
    pub fn pair_count(&self) -> usize {
        parse_steps(&self.steps_input).len().saturating_sub(1)
    }

    pub fn value(&self, key: PairKey) -> FlowValue {
        self.values.get(&key).copied().unwrap_or(FlowValue::ZERO)
    }

    /// Stores `raw` for `key`, clamping negatives and non-finite input to zero.
    pub fn set_value(&mut self, key: PairKey, raw: f64) -> FlowValue {
        let value = FlowValue::clamped(raw);
        if value.is_zero() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
        value
    }

    pub fn values(&self) -> &BTreeMap<PairKey, FlowValue> {
        &self.values
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }
}
