//! # Form State
//!
//! The contact form as a plain state machine, no rendering attached.
//!
//! ```text
//! Idle ── begin_submit ──> Submitting ── finish(Accepted) ──> Success ── hide_if ──> Idle
//!                              │
//!                              └──── finish(Rejected | TransportFailure) ──> Error ── begin_submit ──> Submitting
//! ```
//!
//! Values survive a failed submission so the user can fix and resend them.
//! They are cleared only on success.
use std::time::Duration;

use contact::{ContactRequest, Field};
use thiserror::Error;

use crate::transport::SubmitOutcome;

pub const AUTO_HIDE_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";
pub const REJECTED_MESSAGE: &str = "Something went wrong. Please try again.";
pub const CONNECTION_MESSAGE: &str =
    "Could not connect to the server. Please check if the backend is running.";

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    pub fn to_request(&self) -> ContactRequest {
        ContactRequest::new(&self.name, &self.email, &self.phone)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> Option<&str> {
        match self {
            Status::None => None,
            Status::Success(message) | Status::Error(message) => Some(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Error,
}

/// Follow-up work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Call [`FormState::hide_if`] with `generation` once `delay` has passed.
    HideAfter { delay: Duration, generation: u64 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    status: Status,
    in_flight: bool,
    visible: bool,
    // Bumped on every toggle so a stale auto-hide cannot close a reopened form.
    generation: u64,
}

impl FormState {
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight {
            return Phase::Submitting;
        }

        match self.status {
            Status::None => Phase::Idle,
            Status::Success(_) => Phase::Success,
            Status::Error(_) => Phase::Error,
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        self.generation += 1;
        self.status = Status::None;
    }

    pub fn begin_submit(&mut self) -> Result<ContactRequest, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::AlreadySubmitting);
        }

        self.in_flight = true;
        self.status = Status::None;

        Ok(self.values.to_request())
    }

    pub fn finish(&mut self, outcome: SubmitOutcome) -> Option<Effect> {
        self.in_flight = false;

        match outcome {
            SubmitOutcome::Accepted { .. } => {
                self.status = Status::Success(SUCCESS_MESSAGE.to_string());
                self.values = FormValues::default();

                Some(Effect::HideAfter {
                    delay: AUTO_HIDE_DELAY,
                    generation: self.generation,
                })
            }
            SubmitOutcome::Rejected { message } => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| REJECTED_MESSAGE.to_string());
                self.status = Status::Error(message);

                None
            }
            SubmitOutcome::TransportFailure => {
                self.status = Status::Error(CONNECTION_MESSAGE.to_string());

                None
            }
        }
    }

    /// Clears the in-flight flag of a submission that never finished.
    pub fn abandon(&mut self) {
        self.in_flight = false;
    }

    pub fn hide_if(&mut self, generation: u64) -> bool {
        if self.generation != generation || !self.visible {
            return false;
        }

        self.visible = false;
        self.status = Status::None;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut state = FormState::default();
        state.toggle_visibility();
        state.update_field(Field::Name, "Jane Doe");
        state.update_field(Field::Email, "jane@x.com");
        state.update_field(Field::Phone, "+1 555-0100");
        state
    }

    #[test]
    fn test_initial_state() {
        let state = FormState::default();

        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.visible());
        assert_eq!(state.button_label(), SEND_LABEL);
        assert_eq!(state.status().message(), None);
    }

    #[test]
    fn test_update_field() {
        let state = filled();

        assert_eq!(state.values().get(Field::Name), "Jane Doe");
        assert_eq!(state.values().get(Field::Email), "jane@x.com");
        assert_eq!(state.values().get(Field::Phone), "+1 555-0100");
    }

    #[test]
    fn test_begin_submit() {
        let mut state = filled();

        let request = state.begin_submit().unwrap();

        assert_eq!(request, ContactRequest::new("Jane Doe", "jane@x.com", "+1 555-0100"));
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.button_label(), SENDING_LABEL);
        assert_eq!(state.begin_submit(), Err(SubmitError::AlreadySubmitting));
    }

    #[test]
    fn test_begin_submit_clears_previous_error() {
        let mut state = filled();
        state.begin_submit().unwrap();
        state.finish(SubmitOutcome::TransportFailure);

        state.begin_submit().unwrap();

        assert_eq!(state.status(), &Status::None);
    }

    #[test]
    fn test_accepted() {
        let mut state = filled();
        state.begin_submit().unwrap();

        let effect = state.finish(SubmitOutcome::Accepted {
            id: Some("abc".to_string()),
        });

        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.status().message(), Some(SUCCESS_MESSAGE));
        assert_eq!(state.values(), &FormValues::default());
        assert_eq!(
            effect,
            Some(Effect::HideAfter {
                delay: AUTO_HIDE_DELAY,
                generation: state.generation(),
            })
        );
    }

    #[test]
    fn test_rejected_uses_server_message() {
        let mut state = filled();
        state.begin_submit().unwrap();

        let effect = state.finish(SubmitOutcome::Rejected {
            message: Some("Please provide all fields".to_string()),
        });

        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.status().message(), Some("Please provide all fields"));
        assert_eq!(state.values().name, "Jane Doe");
    }

    #[test]
    fn test_rejected_fallback_message() {
        for message in [None, Some(String::new())] {
            let mut state = filled();
            state.begin_submit().unwrap();

            state.finish(SubmitOutcome::Rejected { message });

            assert_eq!(state.status().message(), Some(REJECTED_MESSAGE));
        }
    }

    #[test]
    fn test_transport_failure_keeps_values() {
        let mut state = filled();
        let before = state.values().clone();
        state.begin_submit().unwrap();

        state.finish(SubmitOutcome::TransportFailure);

        assert!(!state.in_flight());
        assert_eq!(state.status(), &Status::Error(CONNECTION_MESSAGE.to_string()));
        assert_eq!(state.values(), &before);
    }

    #[test]
    fn test_toggle_clears_status() {
        let mut state = filled();
        state.begin_submit().unwrap();
        state.finish(SubmitOutcome::TransportFailure);

        state.toggle_visibility();
        state.toggle_visibility();

        assert!(state.visible());
        assert_eq!(state.status(), &Status::None);
    }

    #[test]
    fn test_hide_after_success() {
        let mut state = filled();
        state.begin_submit().unwrap();
        let Some(Effect::HideAfter { generation, .. }) = state.finish(SubmitOutcome::Accepted {
            id: None,
        }) else {
            panic!("expected auto-hide");
        };

        assert!(state.hide_if(generation));
        assert!(!state.visible());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_hide_is_ignored() {
        let mut state = filled();
        state.begin_submit().unwrap();
        let Some(Effect::HideAfter { generation, .. }) = state.finish(SubmitOutcome::Accepted {
            id: None,
        }) else {
            panic!("expected auto-hide");
        };

        // Closed and reopened before the delay ran out.
        state.toggle_visibility();
        state.toggle_visibility();

        assert!(!state.hide_if(generation));
        assert!(state.visible());
    }

    #[test]
    fn test_abandon() {
        let mut state = filled();
        state.begin_submit().unwrap();

        state.abandon();

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.values().phone, "+1 555-0100");
    }
}
