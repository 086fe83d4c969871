//! Notification channel for contact enquiries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// A validated enquiry ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl Enquiry {
    /// Subject line shown in the operator's inbox.
    pub fn subject(&self) -> String {
        if self.company.is_empty() {
            format!("New enquiry — {}", self.name)
        } else {
            format!("New enquiry — {} @ {}", self.name, self.company)
        }
    }

    pub fn body_text(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nCompany: {}\n\nMessage:\n{}\n",
            self.name,
            self.email,
            if self.company.is_empty() { "-" } else { &self.company },
            self.message,
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MailError {
    #[error("mail credential not configured")]
    MissingCredential,

    #[error("mail provider returned status {0}")]
    ProviderStatus(reqwest::StatusCode),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Dispatches an enquiry notification, returning the provider-assigned id
/// when one is available.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_enquiry(&self, enquiry: &Enquiry) -> Result<Option<String>, MailError>;
}

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    text: String,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

/// `Mailer` backed by the Resend transactional-email API.
pub struct ResendMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    to: String,
    from: String,
}

impl ResendMailer {
    pub fn new(http: reqwest::Client, api_key: Option<String>, to: String, from: String) -> Self {
        Self {
            http,
            api_url: RESEND_API_URL.to_string(),
            api_key,
            to,
            from,
        }
    }

    /// Points the mailer at a different endpoint. Used by tests.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_enquiry(&self, enquiry: &Enquiry) -> Result<Option<String>, MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::MissingCredential)?;

        let email = ResendEmail {
            from: &self.from,
            to: [&self.to],
            reply_to: &enquiry.email,
            subject: enquiry.subject(),
            text: enquiry.body_text(),
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::ProviderStatus(response.status()));
        }

        let body: ResendResponse = response.json().await?;
        info!("Enquiry dispatched, provider id: {:?}", body.id);
        Ok(body.id)
    }
}
