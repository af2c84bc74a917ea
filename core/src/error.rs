use thiserror::Error;

use crate::marker::ActionKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("{kind:?} marker is missing required attribute {attribute}")]
    MissingAttribute {
        kind: ActionKind,
        attribute: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("a profile picture submission is already in flight")]
    InFlight,
    #[error("completion for ticket {found} does not match the running submission")]
    StaleTicket { found: u64 },
}

/// Which request of the submit chain failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Submit,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("{stage:?} request failed: {message}")]
    Transport { stage: RequestStage, message: String },
    #[error("Server returned error status: {status}")]
    Status { stage: RequestStage, status: u16 },
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("failed to parse refreshed page: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Json(#[from] serde_json::Error),
}
