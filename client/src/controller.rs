use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contact::Field;
use tokio::time::sleep;
use tracing::debug;

use crate::{
    form::{Effect, FormState, Status, SubmitError},
    transport::ContactTransport,
};

/// Drives a [`FormState`] through one network exchange per submission.
///
/// Dropping the controller while a request is in flight does not cancel the request,
/// and a pending auto-hide still fires against the shared state.
pub struct ContactForm<T> {
    transport: T,
    state: Arc<Mutex<FormState>>,
}

impl<T: ContactTransport> ContactForm<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    pub fn state(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        lock(&self.state).update_field(field, value);
    }

    pub fn toggle_visibility(&self) {
        lock(&self.state).toggle_visibility();
    }

    pub async fn submit(&self) -> Result<Status, SubmitError> {
        let request = lock(&self.state).begin_submit()?;
        let mut in_flight = InFlight {
            state: &self.state,
            armed: true,
        };

        let outcome = self.transport.send(&request).await;
        debug!("Contact submission finished: {outcome:?}");

        in_flight.armed = false;
        let mut state = lock(&self.state);

        if let Some(Effect::HideAfter { delay, generation }) = state.finish(outcome) {
            let shared = self.state.clone();

            tokio::spawn(async move {
                sleep(delay).await;
                lock(&shared).hide_if(generation);
            });
        }

        Ok(state.status().clone())
    }
}

/// Clears the in-flight flag if the submit future is dropped before the reply arrives.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.state).abandon();
        }
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
