// table-client/tests/payment_provider.rs
// 支付会话集成测试

mod common;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::FailureKind;
use shared::error::{AppError, ErrorCode};
use shared::models::{AvailableDate, BookingIntent, RestaurantDetail, RestaurantId, TimeSlot};
use table_client::{ClientConfig, ClientError, CheckoutSessionRequest, PaymentProvider};

use common::{Recorder, spawn};

async fn create_session(
    State(rec): State<Recorder>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.push(body.clone());
    if body["email"] == "declined@x.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Payment method not accepted"})),
        );
    }
    if body["email"] == "silent@x.com" {
        return (StatusCode::PAYMENT_REQUIRED, Json(json!({})));
    }
    if body["email"] == "outage@x.com" {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "Stripe is down"})),
        );
    }
    (StatusCode::OK, Json(json!({"sessionId": "cs_test_123"})))
}

fn intent() -> BookingIntent {
    let restaurant = RestaurantDetail {
        id: RestaurantId::new("3"),
        name: "Le Jardin".into(),
        description: String::new(),
        address: String::new(),
        rating: 0.0,
        price_range: String::new(),
        michelin: false,
        images: vec![],
        features: vec![],
        available_dates: vec![AvailableDate {
            id: None,
            date: "2025-03-01".into(),
            time_slots: vec![TimeSlot {
                id: None,
                time: "19:00".into(),
                price: Decimal::new(50, 0),
            }],
        }],
    };
    let created = Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap();
    BookingIntent::from_selection(&restaurant, "2025-03-01", "19:00", created).unwrap()
}

async fn provider() -> (impl PaymentProvider, Recorder) {
    let rec = Recorder::default();
    let app = Router::new()
        .route("/api/stripe/create-checkout-session", post(create_session))
        .with_state(rec.clone());
    let base = spawn(app).await;
    let provider = ClientConfig::new("http://unused.invalid")
        .with_payment_url(base)
        .build_payment_provider()
        .unwrap();
    (provider, rec)
}

#[tokio::test]
async fn test_create_session_sends_email_and_booking_details() {
    let (provider, rec) = provider().await;

    let session = provider
        .create_checkout_session(&CheckoutSessionRequest {
            email: "u@x.com".into(),
            booking_details: intent(),
        })
        .await
        .unwrap();
    assert_eq!(session.session_id, "cs_test_123");

    let body = &rec.all()[0];
    assert_eq!(body["email"], "u@x.com");
    assert_eq!(body["bookingDetails"]["restaurantId"], "3");
    assert_eq!(body["bookingDetails"]["selectedSlot"], "19:00");
    assert_eq!(body["bookingDetails"]["selectedTimeSlotPrice"], 50.0);
}

#[tokio::test]
async fn test_rejection_carries_provider_message() {
    let (provider, _) = provider().await;

    let err = provider
        .create_checkout_session(&CheckoutSessionRequest {
            email: "declined@x.com".into(),
            booking_details: intent(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::PaymentRejected(_)));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::PaymentProviderRejected);
    assert_eq!(app.kind(), FailureKind::Provider);
    assert_eq!(app.message, "Payment method not accepted");
}

#[tokio::test]
async fn test_rejection_without_message_names_status() {
    let (provider, _) = provider().await;

    let err = provider
        .create_checkout_session(&CheckoutSessionRequest {
            email: "silent@x.com".into(),
            booking_details: intent(),
        })
        .await
        .unwrap_err();
    match err {
        ClientError::PaymentRejected(message) => assert!(message.contains("402")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let (provider, rec) = provider().await;

    let err = provider
        .create_checkout_session(&CheckoutSessionRequest {
            email: "outage@x.com".into(),
            booking_details: intent(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unavailable { status: 503, .. }));
    assert_eq!(rec.all().len(), 1);

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::NetworkError);
    assert_eq!(app.kind(), FailureKind::Network);
}
