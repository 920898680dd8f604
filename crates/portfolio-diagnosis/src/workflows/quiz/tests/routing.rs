use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::quiz::intake::PortfolioSubmission;
use crate::workflows::quiz::router::submit_handler;

fn json_request(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("encode payload")))
        .expect("request builds")
}

#[tokio::test]
async fn submit_handler_returns_unprocessable_for_invalid_contact() {
    let service = Arc::new(build_service(Arc::new(RecordingTransport::default())));
    let mut submission = PortfolioSubmission {
        contact: contact(),
        amounts: sample_amounts(),
    };
    submission.contact.phone = "call me".to_string();
    submission.contact.email = "nobody".to_string();

    let response = submit_handler::<RecordingTransport>(State(service), Json(submission)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["errors"]["phone"], "有効な電話番号を入力してください");
    assert_eq!(
        body["errors"]["email"],
        "有効なメールアドレスを入力してください"
    );
    assert!(body["errors"].get("name").is_none());
}

#[tokio::test]
async fn submit_route_returns_result_path() {
    let router = router_with_transport(Arc::new(RecordingTransport::default()));

    let response = router
        .oneshot(json_request(
            "/api/v1/portfolio/submit",
            &json!({
                "userInfo": {
                    "name": "山田太郎",
                    "phone": "090-1234-5678",
                    "email": "taro@example.com"
                },
                "amounts": { "stocks": 600000, "cash": 400000 }
            }),
        ))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["resultPath"]
        .as_str()
        .is_some_and(|path| path.starts_with("/result?stocks=60.00")));
    assert_eq!(body["percentages"]["cash"], 40.0);
    assert_eq!(body["totalAmount"], 1_000_000.0);
}

#[tokio::test]
async fn result_route_diagnoses_valid_query() {
    let router = router_with_transport(Arc::new(RecordingTransport::default()));

    let response = router
        .oneshot(
            Request::get("/api/v1/portfolio/result?stocks=60.00&cash=40.00&amt_stocks=600000&amt_cash=400000&total=1000000")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "diagnosed");
    assert_eq!(body["diagnosis"]["type"], "gambler");
    assert_eq!(body["breakdown"][0]["label"], "株式");
    assert_eq!(body["emailRequest"]["totalAmount"], 1_000_000.0);
}

#[tokio::test]
async fn result_route_without_query_returns_empty_state() {
    let router = router_with_transport(Arc::new(RecordingTransport::default()));

    let response = router
        .oneshot(
            Request::get("/api/v1/portfolio/result")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "empty");
    assert_eq!(body["link"]["label"], "トップに戻る");
}

#[tokio::test]
async fn send_email_route_reports_success() {
    let transport = Arc::new(RecordingTransport::default());
    let router = router_with_transport(transport.clone());
    let payload = serde_json::to_value(email_request()).expect("encode request");

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "メール送信が完了しました");
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn send_email_route_accepts_result_without_type_or_condition() {
    let transport = Arc::new(RecordingTransport::default());
    let router = router_with_transport(transport.clone());
    let mut payload = serde_json::to_value(email_request()).expect("encode request");
    let diagnosis = payload["diagnosisResult"]
        .as_object_mut()
        .expect("diagnosis object");
    diagnosis.remove("type");
    diagnosis.remove("condition");

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn send_email_route_reports_transport_failure() {
    let transport = Arc::new(FailingTransport::default());
    let router = router_with_transport(transport.clone());
    let payload = serde_json::to_value(email_request()).expect("encode request");

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "メール送信に失敗しました");
    assert!(body["error"]
        .as_str()
        .is_some_and(|error| error.contains("connection refused")));
    assert_eq!(body["debug"]["smtpHost"], "smtp.test.local");
    assert_eq!(body["debug"]["smtpUser"], "未設定");
    assert_eq!(transport.attempts(), 1);
}

#[tokio::test]
async fn send_email_route_fails_when_admin_notification_fails() {
    let transport = Arc::new(AdminFailingTransport::default());
    let router = router_with_transport(transport.clone());
    let payload = serde_json::to_value(email_request()).expect("encode request");

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .is_some_and(|error| error.starts_with("admin mail failed")));
    assert_eq!(transport.attempts(), 2);
    assert_eq!(transport.accepted().len(), 1);
}

#[tokio::test]
async fn send_email_route_accepts_fractional_scores() {
    let transport = Arc::new(RecordingTransport::default());
    let router = router_with_transport(transport.clone());
    let mut payload = serde_json::to_value(email_request()).expect("encode request");
    payload["diagnosisResult"]["stats"]["attack"] = json!(72.5);

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].body.as_str().contains(">72.5</td>"));
}

#[tokio::test]
async fn send_email_route_accepts_scores_above_byte_range() {
    let transport = Arc::new(RecordingTransport::default());
    let router = router_with_transport(transport.clone());
    let mut payload = serde_json::to_value(email_request()).expect("encode request");
    payload["diagnosisResult"]["stats"]["defense"] = json!(300);

    let response = router
        .oneshot(json_request("/api/send-email", &payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(transport.sent()[0].body.as_str().contains(">300</td>"));
}

#[tokio::test]
async fn send_email_route_rejects_malformed_body() {
    let transport = Arc::new(RecordingTransport::default());
    let router = router_with_transport(transport.clone());

    let response = router
        .oneshot(json_request("/api/send-email", &json!({ "userInfo": "nope" })))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(transport.sent().is_empty());
}
