//! Contact form dispatch with a honeypot spam trap.

use axum::{
    extract::{Json, State},
    response::Json as ResponseJson,
};
use tracing::{debug, error, info};

use sitegate_shared::{ContactPayload, SubmissionResult};

use crate::{error::ContactError, mailer::Enquiry, AppState};

pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<ResponseJson<SubmissionResult>, ContactError> {
    // Bots fill the hidden field; answer with a fake success so the trap
    // stays invisible to them.
    if !payload.hp.is_empty() {
        debug!("Honeypot tripped, discarding submission");
        return Ok(ResponseJson(SubmissionResult::success(None)));
    }

    if payload.name.is_empty() || payload.email.is_empty() || payload.message.is_empty() {
        return Err(ContactError::MissingFields);
    }

    let enquiry = Enquiry {
        name: payload.name,
        email: payload.email,
        company: payload.company,
        message: payload.message,
    };

    match state.mailer.send_enquiry(&enquiry).await {
        Ok(id) => {
            info!("Contact enquiry from {} dispatched", enquiry.email);
            Ok(ResponseJson(SubmissionResult::success(id)))
        }
        Err(e) => {
            error!("Contact dispatch failed: {}", e);
            Err(ContactError::DispatchFailed)
        }
    }
}
