// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::{FlowValue, Step};

/// Directed edge between the step at `source` and the step right after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flow {
    source: usize,
    value: FlowValue,
}

impl Flow {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.source + 1
    }

    pub fn value(&self) -> FlowValue {
        self.value
    }
}

/// Ordered steps plus one flow per consecutive pair.
///
/// Invariants: at least two steps, and exactly `steps.len() - 1` flows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessFlow {
    steps: Vec<Step>,
    flows: Vec<Flow>,
}

impl ProcessFlow {
    pub const MIN_STEPS: usize = 2;

    pub fn new(steps: Vec<Step>, values: Vec<FlowValue>) -> Result<Self, ProcessFlowError> {
        if steps.len() < Self::MIN_STEPS {
            return Err(ProcessFlowError::TooFewSteps { steps: steps.len() });
        }
        let expected = steps.len() - 1;
        if values.len() != expected {
            return Err(ProcessFlowError::ValueCountMismatch { expected, actual: values.len() });
        }

        let flows = values
            .into_iter()
            .enumerate()
            .map(|(source, value)| Flow { source, value })
            .collect();
        Ok(Self { steps, flows })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// `(from, to, flow)` for each consecutive pair, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Step, &Step, &Flow)> + '_ {
        self.flows
            .iter()
            .map(|flow| (&self.steps[flow.source()], &self.steps[flow.target()], flow))
    }

    pub fn is_all_zero(&self) -> bool {
        self.flows.iter().all(|flow| flow.value.is_zero())
    }

    pub fn max_value(&self) -> FlowValue {
        self.flows
            .iter()
            .map(Flow::value)
            .fold(FlowValue::ZERO, |acc, value| if value > acc { value } else { acc })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessFlowError {
    TooFewSteps { steps: usize },
    ValueCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ProcessFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSteps { steps } => {
                write!(f, "a process flow needs at least 2 steps, got {steps}")
            }
            Self::ValueCountMismatch { expected, actual } => {
                write!(f, "expected {expected} flow values (one per step pair), got {actual}")
            }
        }
    }
}

impl std::error::Error for ProcessFlowError {}
