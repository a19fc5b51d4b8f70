//! Custom request lifecycle and progress.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Stored status of a custom agent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Submitted,
    Reviewing,
    Accepted,
    Completed,
    /// Terminal, outside the ordered steps.
    Rejected,
}

/// Ordered progress steps. `Rejected` is deliberately absent.
pub const STEP_ORDER: [RequestStatus; 4] = [
    RequestStatus::Submitted,
    RequestStatus::Reviewing,
    RequestStatus::Accepted,
    RequestStatus::Completed,
];

impl RequestStatus {
    /// Every status, including the terminal one.
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Submitted,
        RequestStatus::Reviewing,
        RequestStatus::Accepted,
        RequestStatus::Completed,
        RequestStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "submitted",
            RequestStatus::Reviewing => "reviewing",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Position in [`STEP_ORDER`], if this status is one of the steps.
    pub fn step_index(&self) -> Option<usize> {
        STEP_ORDER.iter().position(|step| step == self)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::RequestStatus(s.to_string()))
    }
}

/// Progress of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub step: RequestStatus,
    /// The request is at or past this step.
    pub reached: bool,
    /// The request is exactly at this step.
    pub current: bool,
    /// The connector after this step is filled (the request is strictly
    /// past it). Always false for the last step.
    pub connector_filled: bool,
}

/// Step-by-step progress for a request, derived from its stored status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestProgress {
    pub steps: Vec<StepProgress>,
    /// The request was rejected; no step is reached.
    pub rejected: bool,
}

impl RequestProgress {
    /// Compute progress from a stored status string.
    ///
    /// Rejected and unrecognised statuses reach no step.
    pub fn for_status(status: &str) -> Self {
        let parsed = status.parse::<RequestStatus>().ok();
        let current_index = parsed.and_then(|s| s.step_index());

        let steps = STEP_ORDER
            .iter()
            .enumerate()
            .map(|(index, step)| StepProgress {
                step: *step,
                reached: current_index.is_some_and(|current| current >= index),
                current: parsed == Some(*step),
                connector_filled: index + 1 < STEP_ORDER.len()
                    && current_index.is_some_and(|current| current > index),
            })
            .collect();

        Self {
            steps,
            rejected: parsed == Some(RequestStatus::Rejected),
        }
    }

    /// Whether `step` has been reached.
    pub fn reached(&self, step: RequestStatus) -> bool {
        self.steps.iter().any(|s| s.step == step && s.reached)
    }

    /// The step the request is currently at, if any.
    pub fn current(&self) -> Option<RequestStatus> {
        self.steps.iter().find(|s| s.current).map(|s| s.step)
    }
}
