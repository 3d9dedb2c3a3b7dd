use std::future::Future;

use contact::ContactRequest;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { id: Option<String> },
    Rejected { message: Option<String> },
    /// Unreachable server, broken connection or a body that is not JSON.
    TransportFailure,
}

pub trait ContactTransport {
    /// Sends one request. Never retries.
    fn send(&self, request: &ContactRequest) -> impl Future<Output = SubmitOutcome> + Send;
}

#[derive(Deserialize)]
struct ReplyBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

pub fn classify(status: StatusCode, body: &[u8]) -> SubmitOutcome {
    let Ok(reply) = serde_json::from_slice::<ReplyBody>(body) else {
        return SubmitOutcome::TransportFailure;
    };

    if status.is_success() {
        SubmitOutcome::Accepted { id: reply.id }
    } else {
        SubmitOutcome::Rejected {
            message: reply.message.filter(|m| !m.is_empty()),
        }
    }
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{CONTACT_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ContactTransport for HttpTransport {
    async fn send(&self, request: &ContactRequest) -> SubmitOutcome {
        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Contact request failed: {e}");
                return SubmitOutcome::TransportFailure;
            }
        };

        let status = response.status();

        match response.bytes().await {
            Ok(body) => classify(status, &body),
            Err(e) => {
                warn!("Failed to read contact response: {e}");
                SubmitOutcome::TransportFailure
            }
        }
    }
}
