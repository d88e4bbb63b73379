//! Contact modal state machine.
//!
//! The modal is one of five states, so combinations like "submitting and
//! showing an error" cannot exist:
//!
//! ```text
//! Closed ──open──▶ Idle ──submit──▶ Submitting ──accepted──▶ Success ──auto_close──▶ Closed
//!                   ▲                  │
//!                   │               rejected /
//!                 close             network failure
//!                   │                  ▼
//! Closed ◀──close── Error ──submit──▶ Submitting
//! ```
//!
//! Closing is blocked while a request is in flight. A successful submission
//! hands out an [`AutoClose`] ticket; firing it after [`SUCCESS_CLOSE_DELAY`]
//! closes the modal once, and stale tickets do nothing.

use std::time::Duration;

use crate::error::ModalError;

/// How long the success message stays up before the modal closes itself.
pub const SUCCESS_CLOSE_DELAY: Duration = Duration::from_millis(3000);

/// Exit-animation window after an auto-close before the form is reset.
pub const RESET_DELAY: Duration = Duration::from_millis(500);

/// Shown after the webhook accepted the lead.
pub const SUCCESS_MESSAGE: &str =
    "Thanks! We've received your info and will be in touch shortly with your free automation analysis.";

/// Shown when the server rejected the lead without a message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred. Please try again.";

/// Shown when the request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str =
    "A network error occurred. Please check your connection and try again.";

/// Current modal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    /// Open, form editable.
    Idle,
    /// Open, request in flight, form disabled.
    Submitting,
    /// Open, showing the confirmation.
    Success,
    /// Open, form editable, inline error shown.
    Error { message: String },
}

impl ModalState {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Idle => "open-idle",
            Self::Submitting => "open-submitting",
            Self::Success => "open-success",
            Self::Error { .. } => "open-error",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the form accepts input and can be submitted.
    pub fn form_enabled(&self) -> bool {
        matches!(self, Self::Idle | Self::Error { .. })
    }

    /// The message to display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => Some(SUCCESS_MESSAGE),
            Self::Error { message } => Some(message.as_str()),
            Self::Closed | Self::Idle | Self::Submitting => None,
        }
    }
}

/// Result of the submit request as seen by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay answered 200.
    Accepted,
    /// The relay answered with an error status, with its `message` if any.
    Rejected { message: Option<String> },
    /// No response was received.
    NetworkFailure,
}

/// Permission to auto-close a specific successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the modal only auto-closes when the ticket is fired"]
pub struct AutoClose {
    generation: u64,
}

impl AutoClose {
    /// How long to wait before firing.
    pub fn delay(self) -> Duration {
        SUCCESS_CLOSE_DELAY
    }
}

/// The contact modal.
#[derive(Debug, Default)]
pub struct ContactModal {
    state: ModalState,
    generation: u64,
}

impl ContactModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Open the modal. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.state.is_open() {
            return false;
        }
        self.state = ModalState::Idle;
        true
    }

    /// Start submitting the form.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::InvalidTransition`] unless the form is enabled.
    pub fn submit(&mut self) -> Result<(), ModalError> {
        if !self.state.form_enabled() {
            return Err(self.invalid("submit"));
        }
        self.state = ModalState::Submitting;
        Ok(())
    }

    /// Apply the outcome of the in-flight request.
    ///
    /// On acceptance, returns the ticket that closes the modal after
    /// [`SUCCESS_CLOSE_DELAY`].
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::InvalidTransition`] if nothing is in flight.
    pub fn resolve(&mut self, outcome: SubmitOutcome) -> Result<Option<AutoClose>, ModalError> {
        if self.state != ModalState::Submitting {
            return Err(self.invalid("resolve a submission"));
        }

        match outcome {
            SubmitOutcome::Accepted => {
                self.state = ModalState::Success;
                self.generation = self.generation.wrapping_add(1);
                Ok(Some(AutoClose {
                    generation: self.generation,
                }))
            }
            SubmitOutcome::Rejected { message } => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned());
                self.state = ModalState::Error { message };
                Ok(None)
            }
            SubmitOutcome::NetworkFailure => {
                self.state = ModalState::Error {
                    message: NETWORK_ERROR_MESSAGE.to_owned(),
                };
                Ok(None)
            }
        }
    }

    /// Fire an auto-close ticket. Returns `true` if the modal closed.
    ///
    /// Only the ticket from the most recent success closes the modal, and
    /// only while that success is still showing.
    pub fn auto_close(&mut self, ticket: AutoClose) -> bool {
        if self.state != ModalState::Success || ticket.generation != self.generation {
            return false;
        }
        self.state = ModalState::Closed;
        true
    }

    /// Close on user request. Returns `true` if the modal closed.
    ///
    /// A no-op while submitting or already closed. Any error is discarded.
    pub fn close(&mut self) -> bool {
        match self.state {
            ModalState::Closed | ModalState::Submitting => false,
            ModalState::Idle | ModalState::Success | ModalState::Error { .. } => {
                self.state = ModalState::Closed;
                true
            }
        }
    }

    fn invalid(&self, event: &'static str) -> ModalError {
        ModalError::InvalidTransition {
            event,
            state: self.state.name(),
        }
    }
}
