//! Integration tests for the contact submission state machine, driven
//! against a fake gateway on an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use sitegate_client::{ContactFields, ContactForm, SubmissionState};
use sitegate_shared::ContactPayload;

type TestResult<T = ()> = anyhow::Result<T>;

#[derive(Clone)]
struct Gateway {
    hits: Arc<AtomicUsize>,
    /// Response body; a submission named "Slow One" is answered only after
    /// a long delay.
    body: Value,
}

async fn gateway_contact(
    State(gateway): State<Gateway>,
    Json(payload): Json<ContactPayload>,
) -> Json<Value> {
    gateway.hits.fetch_add(1, Ordering::SeqCst);
    if payload.name == "Slow One" {
        tokio::time::sleep(Duration::from_secs(2)).await;
        return Json(json!({"ok": false, "error": "stale result"}));
    }
    Json(gateway.body.clone())
}

async fn spawn_gateway(body: Value) -> TestResult<(String, Arc<AtomicUsize>)> {
    let hits = Arc::new(AtomicUsize::new(0));
    let gateway = Gateway {
        hits: hits.clone(),
        body,
    };
    let router = Router::new()
        .route("/api/contact", post(gateway_contact))
        .with_state(gateway);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok((format!("http://{addr}/api/contact"), hits))
}

fn valid_fields() -> ContactFields {
    ContactFields {
        name: "Jane Doe".into(),
        email: "jane@acme.io".into(),
        company: "Acme".into(),
        message: "We need an energy audit for our plant.".into(),
        hp: String::new(),
    }
}

#[tokio::test]
async fn validation_failure_issues_no_request() -> TestResult {
    let (endpoint, hits) = spawn_gateway(json!({"ok": true})).await?;
    let form = ContactForm::new(endpoint);
    form.set_fields(ContactFields {
        name: "".into(),
        email: "a@b.com".into(),
        company: "".into(),
        message: "1234567890".into(),
        hp: String::new(),
    })
    .await;

    form.submit().await;
    form.wait().await;

    assert_eq!(
        form.state().await,
        SubmissionState::Error("Please enter your full name.".into())
    );
    // Validation errors keep the form editable; no compose link is offered.
    assert!(form.fallback_link().await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn successful_submission_resets_form() -> TestResult {
    let (endpoint, hits) = spawn_gateway(json!({"ok": true, "id": "em_test123"})).await?;
    let form = ContactForm::new(endpoint);
    form.set_fields(valid_fields()).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(form.state().await, SubmissionState::Sent);
    assert_eq!(form.fields().await, ContactFields::default());
    assert!(form.fallback_link().await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn ok_false_body_surfaces_error_and_offers_fallback() -> TestResult {
    let (endpoint, _hits) =
        spawn_gateway(json!({"ok": false, "error": "Email failed to send"})).await?;
    let form = ContactForm::new(endpoint);
    form.set_fields(valid_fields()).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(
        form.state().await,
        SubmissionState::Error("Email failed to send".into())
    );
    let link = form.fallback_link().await.expect("fallback link");
    assert!(link.starts_with("mailto:info@oddeeconsultancy.co.uk?subject="));
    // The entered fields survive the failure.
    assert_eq!(form.fields().await, valid_fields());
    Ok(())
}

#[tokio::test]
async fn success_body_with_stray_error_text_is_still_success() -> TestResult {
    // Only an `ok: false` body may fail a submission; a success envelope
    // carrying leftover error text does not.
    let (endpoint, _hits) =
        spawn_gateway(json!({"ok": true, "id": "em_test123", "error": "ignored"})).await?;
    let form = ContactForm::new(endpoint);
    form.set_fields(valid_fields()).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(form.state().await, SubmissionState::Sent);
    assert!(form.fallback_link().await.is_none());
    Ok(())
}

#[tokio::test]
async fn non_success_status_yields_status_message() -> TestResult {
    async fn feel_unwell() -> (axum::http::StatusCode, &'static str) {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }
    let router = Router::new().route("/api/contact", post(feel_unwell));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let form = ContactForm::new(format!("http://{addr}/api/contact"));
    form.set_fields(valid_fields()).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(
        form.state().await,
        SubmissionState::Error("Request failed with status 500.".into())
    );
    assert!(form.fallback_link().await.is_some());
    Ok(())
}

#[tokio::test]
async fn timeout_is_reported_distinctly() -> TestResult {
    let (endpoint, _hits) = spawn_gateway(json!({"ok": true})).await?;
    let form = ContactForm::new(endpoint).with_timeout(Duration::from_millis(100));
    let mut fields = valid_fields();
    fields.name = "Slow One".into();
    form.set_fields(fields).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(
        form.state().await,
        SubmissionState::Error("Request timed out.".into())
    );
    assert!(form.fallback_link().await.is_some());
    Ok(())
}

#[tokio::test]
async fn resubmission_cancels_the_stale_attempt() -> TestResult {
    let (endpoint, hits) = spawn_gateway(json!({"ok": true, "id": "em_second"})).await?;
    let form = ContactForm::new(endpoint);

    let mut slow = valid_fields();
    slow.name = "Slow One".into();
    form.set_fields(slow).await;
    form.submit().await;
    assert_eq!(form.state().await, SubmissionState::Sending);

    // Resubmit before the first attempt can settle; only this result may
    // reach the visible state.
    form.set_fields(valid_fields()).await;
    form.submit().await;
    form.wait().await;

    assert_eq!(form.state().await, SubmissionState::Sent);
    assert_eq!(form.fields().await, ContactFields::default());
    assert!(hits.load(Ordering::SeqCst) >= 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_gateway_reports_network_error() -> TestResult {
    // Nothing listens here.
    let form = ContactForm::new("http://127.0.0.1:9/api/contact");
    form.set_fields(valid_fields()).await;

    form.submit().await;
    form.wait().await;

    assert_eq!(
        form.state().await,
        SubmissionState::Error("Network error. Please try again.".into())
    );
    assert!(form.fallback_link().await.is_some());
    Ok(())
}
