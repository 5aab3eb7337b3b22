//! Round outcome events

use serde::{Deserialize, Serialize};

/// The outcome a behaviour reports to the external round driver.
///
/// Failures inside a behaviour surface as one of these, never as a raw
/// error crossing into the consensus layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundEvent {
    Done,
    Error,
    NoFunds,
}

impl RoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Error => "error",
            Self::NoFunds => "no_funds",
        }
    }
}

impl std::fmt::Display for RoundEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event plus the optional payload the driver finalizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourOutcome {
    pub event: RoundEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl BehaviourOutcome {
    pub fn done() -> Self {
        Self {
            event: RoundEvent::Done,
            payload: None,
        }
    }

    pub fn error() -> Self {
        Self {
            event: RoundEvent::Error,
            payload: None,
        }
    }

    pub fn no_funds() -> Self {
        Self {
            event: RoundEvent::NoFunds,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}
