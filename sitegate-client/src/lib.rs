//! Contact submission pipeline for one form instance.
//!
//! Drives `idle -> sending -> {sent, error}` with local validation first,
//! single-flight submission (a new submit cancels the previous attempt),
//! a timeout, and a pre-filled mail-compose fallback on any failure so an
//! enquiry is never silently dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use sitegate_shared::{ContactPayload, SubmissionResult};

mod fallback;
mod validate;

pub use fallback::compose_link;
pub use validate::validate;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_FALLBACK_TO: &str = "info@oddeeconsultancy.co.uk";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Sending,
    Sent,
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    /// Honeypot; stays empty for genuine submissions.
    pub hp: String,
}

impl ContactFields {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

struct FormInner {
    fields: ContactFields,
    state: SubmissionState,
    // Each submission owns a generation; only the latest generation's
    // completion may update state.
    generation: u64,
    fallback: Option<String>,
}

pub struct ContactForm {
    http: reqwest::Client,
    endpoint: String,
    fallback_to: String,
    timeout: Duration,
    inner: Arc<Mutex<FormInner>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl ContactForm {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            fallback_to: DEFAULT_FALLBACK_TO.to_string(),
            timeout: DEFAULT_TIMEOUT,
            inner: Arc::new(Mutex::new(FormInner {
                fields: ContactFields::default(),
                state: SubmissionState::Idle,
                generation: 0,
                fallback: None,
            })),
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback_address(mut self, to: impl Into<String>) -> Self {
        self.fallback_to = to.into();
        self
    }

    pub async fn set_fields(&self, fields: ContactFields) {
        self.inner.lock().await.fields = fields;
    }

    pub async fn fields(&self) -> ContactFields {
        self.inner.lock().await.fields.clone()
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.state.clone()
    }

    /// Mail-compose link offered while in the error state.
    pub async fn fallback_link(&self) -> Option<String> {
        self.inner.lock().await.fallback.clone()
    }

    /// Starts a submission. Validation failures surface immediately with no
    /// request issued and, deliberately, no compose fallback: the user can
    /// still correct the field, whereas the mailto link exists so a sendable
    /// enquiry survives a network failure. Otherwise any in-flight attempt
    /// is cancelled and a new one is spawned.
    pub async fn submit(&self) {
        // Every submit supersedes whatever was in flight, even when the new
        // fields fail validation; a stale completion must never surface.
        let mut in_flight = self.in_flight.lock().await;
        if let Some(stale) = in_flight.take() {
            debug!("Cancelling in-flight submission");
            stale.abort();
        }

        let (payload, generation) = {
            let mut inner = self.inner.lock().await;
            inner.fallback = None;
            inner.generation += 1;

            if let Err(message) = validate(&inner.fields) {
                inner.state = SubmissionState::Error(message);
                return;
            }

            inner.state = SubmissionState::Sending;

            let payload = ContactPayload {
                name: inner.fields.name.trim().to_string(),
                email: inner.fields.email.trim().to_string(),
                company: inner.fields.company.trim().to_string(),
                message: inner.fields.message.trim().to_string(),
                hp: inner.fields.hp.clone(),
            };
            (payload, inner.generation)
        };

        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let fallback_to = self.fallback_to.clone();
        let timeout = self.timeout;
        let inner = self.inner.clone();

        *in_flight = Some(tokio::spawn(async move {
            let outcome = send_payload(&http, &endpoint, &payload, timeout).await;

            let mut inner = inner.lock().await;
            if inner.generation != generation {
                // A newer submission owns the visible state now.
                return;
            }
            match outcome {
                Ok(id) => {
                    debug!("Submission accepted, id: {:?}", id);
                    inner.fields.reset();
                    inner.fallback = None;
                    inner.state = SubmissionState::Sent;
                }
                Err(message) => {
                    inner.fallback = Some(compose_link(&fallback_to, &inner.fields));
                    inner.state = SubmissionState::Error(message);
                }
            }
        }));
    }

    /// Waits for the current in-flight submission, if any, to settle.
    pub async fn wait(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            // A JoinError here means the attempt was cancelled by a newer one.
            let _ = handle.await;
        }
    }
}

async fn send_payload(
    http: &reqwest::Client,
    endpoint: &str,
    payload: &ContactPayload,
    timeout: Duration,
) -> Result<Option<String>, String> {
    let exchange = async {
        let response = http.post(endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.json::<SubmissionResult>().await.ok();
        Ok::<_, reqwest::Error>((status, body))
    };

    let (status, body) = match tokio::time::timeout(timeout, exchange).await {
        Err(_) => return Err("Request timed out.".to_string()),
        Ok(Err(e)) => {
            warn!("Submission transport error: {}", e);
            return Err("Network error. Please try again.".to_string());
        }
        Ok(Ok(result)) => result,
    };

    match (status.is_success(), body) {
        (true, Some(SubmissionResult { ok: true, id, .. })) => Ok(id),
        (_, Some(SubmissionResult { ok: false, error: Some(error), .. })) => Err(error),
        (false, _) => Err(format!("Request failed with status {}.", status.as_u16())),
        _ => Err("Failed to send".to_string()),
    }
}
