//! Error types for `daiv-core`.
//!
//! Relay errors never include credentials. Upstream response bodies are kept
//! on [`RelayError::UpstreamRejected`] for operator logs only; callers of the
//! HTTP endpoint never see them.

/// Errors from strict validation of a lead submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    /// A required field is not present.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A required field is present but blank.
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A field carries a non-string JSON value.
    #[error("field '{field}' must be a string")]
    NotAString { field: String },

    /// A bucket field carries a value outside its option list.
    #[error("'{value}' is not a valid option for '{field}'")]
    InvalidOption { field: &'static str, value: String },

    /// The submission contains a field the form does not have.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
}

/// Errors from relaying a submission to the webhook.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// One or more of the webhook settings are absent or empty.
    #[error("missing relay configuration: {}", missing.join(", "))]
    MissingConfig { missing: Vec<&'static str> },

    /// The request body is not a JSON object.
    #[error("{reason}")]
    MalformedSubmission { reason: String },

    /// Strict validation rejected the submission.
    #[error("invalid submission: {0}")]
    InvalidSubmission(#[from] LeadError),

    /// The outbound request could not be completed (DNS, connect, I/O).
    #[error("webhook request failed: {reason}")]
    Transport { reason: String },

    /// The webhook answered with a non-success status.
    #[error("webhook responded with status {status}")]
    UpstreamRejected { status: u16, body: String },

    /// The webhook answered with success but the body is not JSON.
    #[error("webhook response is not valid JSON: {reason}")]
    MalformedUpstream { reason: String },
}

/// Errors from the contact modal state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// The requested event is not valid in the current state.
    #[error("cannot {event} while the contact modal is {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
}
