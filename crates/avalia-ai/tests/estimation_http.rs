use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use avalia_ai::valuation::estimation::display_text;
use avalia_ai::valuation::{
    EstimateStatus, EstimationError, FieldEdit, FieldId, FormLayout, FormSession,
    HttpPriceEstimator, PriceEstimator, ESTIMATE_ERROR_MESSAGE,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn_endpoint(reply: (StatusCode, Value)) -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/api/estimate-price",
            post(
                move |State(captured): State<Captured>, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        captured.lock().expect("capture mutex").push(body);
                        (reply.0, Json(reply.1))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("estimation stub serves");
    });
    (addr, captured)
}

fn session_at(address: &str) -> FormSession {
    let mut session = FormSession::open(FormLayout::SinglePage);
    session.apply_all(&[
        FieldEdit::text(FieldId::PropertyType, "house"),
        FieldEdit::text(FieldId::PropertySubtype, "sobrado"),
        FieldEdit::text(FieldId::Address, address),
        FieldEdit::text(FieldId::Bedrooms, "3"),
    ]);
    session
}

#[tokio::test]
async fn posts_form_and_address_and_displays_price() {
    let (addr, captured) = spawn_endpoint((StatusCode::OK, json!({ "estimatedPrice": "5000" }))).await;
    let estimator =
        HttpPriceEstimator::new(&format!("http://{addr}/api/estimate-price")).expect("client");

    let mut session = session_at("Rua A, 123");
    let (token, request) = session.begin_estimate().expect("estimate starts");
    let result = estimator.estimate(request).await;
    assert!(result.is_ok(), "unexpected failure: {result:?}");
    session.finish_estimate(token, Ok(display_text(&result)));

    assert_eq!(session.estimate().status(), EstimateStatus::Ready);
    assert_eq!(session.estimate().text(), Some("5000"));

    let bodies = captured.lock().expect("capture mutex").clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["address"], "Rua A, 123");
    assert_eq!(bodies[0]["propertyData"]["propertyType"], "house");
    assert_eq!(bodies[0]["propertyData"]["propertySubtype"], "sobrado");
    assert_eq!(bodies[0]["propertyData"]["bedrooms"], 3);
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let (addr, _) = spawn_endpoint((
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model offline" }),
    ))
    .await;
    let estimator =
        HttpPriceEstimator::new(&format!("http://{addr}/api/estimate-price")).expect("client");

    let mut session = session_at("Rua A, 123");
    let (_, request) = session.begin_estimate().expect("estimate starts");
    let result = estimator.estimate(request).await;
    assert!(matches!(result, Err(EstimationError::Status(500))));
    assert_eq!(display_text(&result), ESTIMATE_ERROR_MESSAGE);
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let (addr, _) = spawn_endpoint((StatusCode::OK, json!({ "price": 10 }))).await;
    let estimator =
        HttpPriceEstimator::new(&format!("http://{addr}/api/estimate-price")).expect("client");

    let mut session = session_at("Rua A, 123");
    let (_, request) = session.begin_estimate().expect("estimate starts");
    let result = estimator.estimate(request).await;
    assert!(matches!(result, Err(EstimationError::Decode(_))));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let estimator =
        HttpPriceEstimator::new(&format!("http://{addr}/api/estimate-price")).expect("client");
    let mut session = session_at("Rua A, 123");
    let (token, request) = session.begin_estimate().expect("estimate starts");
    let result = estimator.estimate(request).await;
    assert!(matches!(result, Err(EstimationError::Transport(_))));

    session.finish_estimate(token, Err(display_text(&result)));
    assert_eq!(session.estimate().status(), EstimateStatus::Failed);
    assert_eq!(session.estimate().text(), Some(ESTIMATE_ERROR_MESSAGE));
}

#[test]
fn rejects_invalid_endpoint() {
    assert!(matches!(
        HttpPriceEstimator::new("not a url"),
        Err(EstimationError::InvalidEndpoint(_))
    ));
}
