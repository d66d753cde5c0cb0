//! End-to-end widget flows through the real HTTP client against an
//! in-process stub of the booking backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, routing::post};
use serde_json::{Value, json};

use salon_chat_widget::api::{BookingForm, HttpApiClient};
use salon_chat_widget::session::{FileSessionStorage, SessionId, SessionStorage};
use salon_chat_widget::widget::{ChatWidget, RecordingView, Sender};

/// Requests captured by the stub, for asserting what went over the wire.
type Captured = Arc<Mutex<Vec<Value>>>;

/// Serve the router on an ephemeral port and return the base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{addr}")
}

/// Stub that echoes chat messages and records every request body.
fn echo_backend(captured: Captured) -> Router {
    let chat_captured = Arc::clone(&captured);
    let book_captured = captured;
    Router::new()
        .route(
            "/api/chat",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&chat_captured);
                async move {
                    let reply = format!(
                        "echo: {}",
                        body["message"].as_str().unwrap_or_default()
                    );
                    captured.lock().unwrap().push(body);
                    Json(json!({ "reply": reply }))
                }
            }),
        )
        .route(
            "/api/book",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&book_captured);
                async move {
                    let taken = body["time"].as_str() == Some("09:00");
                    captured.lock().unwrap().push(body);
                    if taken {
                        Json(json!({ "ok": false, "msg": "slot taken" }))
                    } else {
                        Json(json!({ "ok": true, "booking_id": "B1" }))
                    }
                }
            }),
        )
}

fn widget_for(base_url: &str) -> ChatWidget<HttpApiClient, RecordingView> {
    let api = HttpApiClient::new(base_url).expect("client");
    ChatWidget::with_welcome_delay(
        api,
        RecordingView::new(),
        SessionId::from_stored("s_flow0001"),
        Duration::ZERO,
    )
}

fn booking_form() -> BookingForm {
    BookingForm::from_fields([
        ("service", "Haircut"),
        ("name", "Rahul"),
        ("date", "2025-12-20"),
        ("time", "15:00"),
        ("phone", "9876543210"),
    ])
}

/// Base URL with nothing listening: bind an ephemeral port, then drop it.
async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn chat_round_trip_tags_session_id() {
    let captured: Captured = Arc::default();
    let base = spawn_stub(echo_backend(Arc::clone(&captured))).await;

    let mut widget = widget_for(&base);
    widget.send_message("hello").await;

    let msgs = widget.transcript().messages();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].sender, Sender::User);
    assert_eq!(msgs[0].text, "hello");
    assert_eq!(msgs[1].sender, Sender::Bot);
    assert_eq!(msgs[1].text, "echo: hello");

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["message"], "hello");
    assert_eq!(requests[0]["session_id"], "s_flow0001");
}

#[tokio::test]
async fn chat_empty_body_falls_back_to_no_reply() {
    let base = spawn_stub(Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({})) }),
    ))
    .await;

    let mut widget = widget_for(&base);
    widget.send_message("hello").await;

    assert_eq!(widget.transcript().messages()[1].text, "No reply.");
}

#[tokio::test]
async fn chat_non_2xx_surfaces_apology() {
    let base = spawn_stub(Router::new().route(
        "/api/chat",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "server exploded",
            )
        }),
    ))
    .await;

    let mut widget = widget_for(&base);
    widget.send_message("hello").await;

    assert_eq!(
        widget.transcript().messages()[1].text,
        "Sorry, something went wrong. Try again."
    );
}

#[tokio::test]
async fn chat_connection_refused_surfaces_apology() {
    let base = dead_base_url().await;

    let mut widget = widget_for(&base);
    widget.send_message("hello").await;

    let msgs = widget.transcript().messages();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[1].text, "Sorry, something went wrong. Try again.");
}

#[tokio::test]
async fn booking_success_over_http() {
    let captured: Captured = Arc::default();
    let base = spawn_stub(echo_backend(Arc::clone(&captured))).await;

    let mut widget = widget_for(&base);
    widget.submit_booking(&booking_form()).await;

    assert_eq!(
        widget.view().statuses,
        vec!["...booking...".to_string(), "Booked! ID: B1".to_string()]
    );
    let confirmation = &widget.transcript().messages()[0];
    assert_eq!(confirmation.sender, Sender::Bot);
    assert_eq!(
        confirmation.text,
        "I booked Haircut for Rahul on 2025-12-20 at 15:00"
    );

    // The form went over the wire as a flat object.
    let requests = captured.lock().unwrap();
    assert_eq!(requests[0]["service"], "Haircut");
    assert_eq!(requests[0]["phone"], "9876543210");
}

#[tokio::test]
async fn booking_rejection_over_http() {
    let captured: Captured = Arc::default();
    let base = spawn_stub(echo_backend(captured)).await;

    let mut form = booking_form();
    form.time = "09:00".into();

    let mut widget = widget_for(&base);
    widget.submit_booking(&form).await;

    assert_eq!(widget.view().last_status(), Some("Error: slot taken"));
    assert!(widget.transcript().is_empty());
}

#[tokio::test]
async fn booking_connection_refused_sets_network_error() {
    let base = dead_base_url().await;

    let mut widget = widget_for(&base);
    widget.submit_booking(&booking_form()).await;

    assert_eq!(widget.view().last_status(), Some("Network error"));
    assert!(widget.transcript().is_empty());
}

#[tokio::test]
async fn session_id_survives_widget_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileSessionStorage::new(dir.path().join("session.json"));

    let first = SessionId::load_or_generate(&storage).expect("bootstrap");
    let second = SessionId::load_or_generate(&storage).expect("rebootstrap");
    assert_eq!(first, second);
    assert_eq!(storage.load(), Some(first));
}
