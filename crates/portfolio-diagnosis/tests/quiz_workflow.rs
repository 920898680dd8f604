//! End-to-end quiz flow through the public router: submit the form, open the result page,
//! then request the result mails.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use portfolio_diagnosis::workflows::quiz::notification::{
    MailError, MailTransport, NotificationService, NotificationSettings, OutgoingMail,
    TransportDiagnostics,
};
use portfolio_diagnosis::workflows::quiz::{quiz_router, QuizService};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Default)]
struct CapturingTransport {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl CapturingTransport {
    fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for CapturingTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push(mail);
        Ok(())
    }
}

fn router(transport: Arc<CapturingTransport>) -> axum::Router {
    let notifications = NotificationService::with_settings(
        transport,
        NotificationSettings::default(),
        TransportDiagnostics {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_user_configured: true,
        },
    );
    quiz_router(Arc::new(QuizService::new(notifications)))
}

async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("encode")))
        .expect("request builds")
}

#[tokio::test]
async fn submission_result_and_mail_flow() {
    let transport = Arc::new(CapturingTransport::default());
    let app = router(transport.clone());

    let submitted = app
        .clone()
        .oneshot(post_json(
            "/api/v1/portfolio/submit",
            &json!({
                "userInfo": {
                    "name": "佐藤花子",
                    "phone": "03-1111-2222",
                    "email": "hanako@example.jp"
                },
                "amounts": {
                    "stocks": 200000,
                    "realEstate": 5000000,
                    "cash": 1000000,
                    "mutualFunds": 800000
                }
            }),
        ))
        .await
        .expect("submit response");
    assert_eq!(submitted.status(), StatusCode::OK);
    let link = read_json(submitted).await;
    let result_path = link["resultPath"].as_str().expect("result path");
    let (_, query) = result_path.split_once('?').expect("query string");

    let result = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/portfolio/result?{query}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("result response");
    assert_eq!(result.status(), StatusCode::OK);
    let view = read_json(result).await;
    assert_eq!(view["status"], "diagnosed");
    assert_eq!(view["diagnosis"]["type"], "landlord");
    assert_eq!(view["breakdown"].as_array().map(Vec::len), Some(4));

    let sent = app
        .oneshot(post_json("/api/send-email", &view["emailRequest"]))
        .await
        .expect("send response");
    assert_eq!(sent.status(), StatusCode::OK);
    assert_eq!(read_json(sent).await["success"], true);

    let mails = transport.sent();
    assert_eq!(mails.len(), 2);
    assert_eq!(mails[0].to, vec!["hanako@example.jp".to_string()]);
    assert!(mails[0].subject.contains("大家さん型"));
    let admin_body = mails[1].body.as_str();
    assert!(admin_body.contains("氏名：佐藤花子"));
    assert!(admin_body.contains("不動産：¥5,000,000"));
    assert!(admin_body.contains("投信／ETF：¥800,000"));
    assert!(!admin_body.contains("暗号通貨："));
}

#[tokio::test]
async fn all_zero_portfolio_never_reaches_diagnosis() {
    let app = router(Arc::new(CapturingTransport::default()));

    let submitted = app
        .clone()
        .oneshot(post_json(
            "/api/v1/portfolio/submit",
            &json!({
                "userInfo": {
                    "name": "佐藤花子",
                    "phone": "03-1111-2222",
                    "email": "hanako@example.jp"
                },
                "amounts": {}
            }),
        ))
        .await
        .expect("submit response");
    assert_eq!(submitted.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        read_json(submitted).await["errors"]["amounts"],
        "資産額を入力してください"
    );

    let result = app
        .oneshot(
            Request::get(
                "/api/v1/portfolio/result?stocks=0&realEstate=0&gold=0\
                 &mutualFunds=0&crypto=0&cash=0&other=0",
            )
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("result response");
    assert_eq!(read_json(result).await["status"], "empty");
}
