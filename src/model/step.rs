// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A named stage in a linear process.
///
/// A step is identified by its position in the owning sequence, not by its label: two steps
/// with the same label are distinct nodes. The label is always non-empty and carries no
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Step {
    label: SmolStr,
}

impl Step {
    pub fn new(label: impl AsRef<str>) -> Result<Self, StepError> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StepError::Empty);
        }
        if trimmed.contains(',') {
            return Err(StepError::ContainsComma);
        }
        Ok(Self { label: SmolStr::new(trimmed) })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl AsRef<str> for Step {
    fn as_ref(&self) -> &str {
        self.label()
    }
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Step {
    type Error = StepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Step> for String {
    fn from(value: Step) -> Self {
        value.label.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    Empty,
    ContainsComma,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("step label must not be empty"),
            Self::ContainsComma => f.write_str("step label must not contain ','"),
        }
    }
}

impl std::error::Error for StepError {}
