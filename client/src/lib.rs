//! # Contact Form Client
//!
//! Client side of the landing page contact form.
//!
//! ## Pieces
//! - [`form`]: the form state machine, pure transitions only
//! - [`transport`]: how one submission reaches the intake endpoint
//! - [`controller`]: ties both together and schedules the auto-hide
//!
//! ## Behaviour
//! - The send button is disabled while a submission is in flight, [`form::FormState::begin_submit`] refuses a second one
//! - Success clears the fields and hides the form after [`form::AUTO_HIDE_DELAY`]
//! - A rejection shows the server's message, or a generic one
//! - An unreachable server shows a connection message
//! - Fields are kept on any failure, nothing is retried automatically
pub mod controller;
pub mod form;
pub mod transport;

pub use controller::ContactForm;
pub use form::{FormState, FormValues, Phase, Status, SubmitError};
pub use transport::{ContactTransport, HttpTransport, SubmitOutcome};
