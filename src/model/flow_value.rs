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

/// Magnitude carried by a flow between two consecutive steps.
///
/// Always finite and `>= 0`. Fractional values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FlowValue(f64);

impl FlowValue {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self, FlowValueError> {
        if !value.is_finite() {
            return Err(FlowValueError::NotFinite);
        }
        if value < 0.0 {
            return Err(FlowValueError::Negative);
        }
        // Normalize `-0.0` so equality and display stay stable.
        Ok(Self(value + 0.0))
    }

    /// Input-boundary constructor: negatives and non-finite values collapse to zero.
    pub fn clamped(value: f64) -> Self {
        Self::new(value).unwrap_or(Self::ZERO)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for FlowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.fract() == 0.0 && value < u64::MAX as f64 {
            let mut buf = itoa::Buffer::new();
            return f.write_str(buf.format(value as u64));
        }
        write!(f, "{value}")
    }
}

impl FromStr for FlowValue {
    type Err = FlowValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let parsed = trimmed.parse::<f64>().map_err(|_| FlowValueError::NotANumber)?;
        Self::new(parsed)
    }
}

impl TryFrom<f64> for FlowValue {
    type Error = FlowValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FlowValue> for f64 {
    fn from(value: FlowValue) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowValueError {
    Negative,
    NotFinite,
    NotANumber,
}

impl fmt::Display for FlowValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("flow value must be >= 0"),
            Self::NotFinite => f.write_str("flow value must be finite"),
            Self::NotANumber => f.write_str("flow value must be a number"),
        }
    }
}

impl std::error::Error for FlowValueError {}
