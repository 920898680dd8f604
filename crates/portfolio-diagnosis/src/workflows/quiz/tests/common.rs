use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::quiz::domain::{AssetClass, PortfolioAllocation, UserContact};
use crate::workflows::quiz::notification::{
    EmailRequest, MailError, MailTransport, NotificationService, NotificationSettings,
    OutgoingMail, TransportDiagnostics,
};
use crate::workflows::quiz::{diagnose, quiz_router, QuizService};

pub(super) fn contact() -> UserContact {
    UserContact {
        name: "山田太郎".to_string(),
        phone: "090-1234-5678".to_string(),
        email: "taro@example.com".to_string(),
    }
}

/// 600,000 yen in stocks and 400,000 yen in cash.
pub(super) fn sample_amounts() -> PortfolioAllocation {
    PortfolioAllocation::default()
        .with(AssetClass::Stocks, 600_000.0)
        .with(AssetClass::Cash, 400_000.0)
}

pub(super) fn percentages(entries: &[(AssetClass, f64)]) -> PortfolioAllocation {
    entries
        .iter()
        .fold(PortfolioAllocation::default(), |allocation, (asset, value)| {
            allocation.with(*asset, *value)
        })
}

pub(super) fn email_request() -> EmailRequest {
    let amounts = sample_amounts();
    let result = diagnose(&amounts.to_percentages());
    EmailRequest::from_diagnosis(contact(), amounts, &result)
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 31, 16, 5, 9)
        .single()
        .expect("valid instant")
}

pub(super) fn diagnostics() -> TransportDiagnostics {
    TransportDiagnostics {
        smtp_host: "smtp.test.local".to_string(),
        smtp_port: 587,
        smtp_user_configured: false,
    }
}

pub(super) fn notification_service<M>(
    transport: Arc<M>,
    settings: NotificationSettings,
) -> NotificationService<M>
where
    M: MailTransport + 'static,
{
    NotificationService::with_settings(transport, settings, diagnostics())
}

pub(super) fn build_service<M>(transport: Arc<M>) -> QuizService<M>
where
    M: MailTransport + 'static,
{
    QuizService::new(notification_service(
        transport,
        NotificationSettings::default(),
    ))
}

pub(super) fn router_with_transport<M>(transport: Arc<M>) -> axum::Router
where
    M: MailTransport + 'static,
{
    quiz_router(Arc::new(build_service(transport)))
}

#[derive(Default, Clone)]
pub(super) struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

impl RecordingTransport {
    pub(super) fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push(mail);
        Ok(())
    }
}

/// Rejects every message and counts how often it was asked to send.
#[derive(Default)]
pub(super) struct FailingTransport {
    attempts: Mutex<usize>,
}

impl FailingTransport {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("transport mutex poisoned")
    }
}

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
        *self.attempts.lock().expect("transport mutex poisoned") += 1;
        Err(MailError::Transport("connection refused".to_string()))
    }
}

/// Accepts the user report and rejects the admin notification.
#[derive(Default)]
pub(super) struct AdminFailingTransport {
    accepted: Mutex<Vec<OutgoingMail>>,
    attempts: Mutex<usize>,
}

impl AdminFailingTransport {
    pub(super) fn accepted(&self) -> Vec<OutgoingMail> {
        self.accepted.lock().expect("transport mutex poisoned").clone()
    }

    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("transport mutex poisoned")
    }
}

#[async_trait]
impl MailTransport for AdminFailingTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let attempt = {
            let mut attempts = self.attempts.lock().expect("transport mutex poisoned");
            *attempts += 1;
            *attempts
        };
        if attempt > 1 {
            return Err(MailError::Transport("admin relay unavailable".to_string()));
        }
        self.accepted
            .lock()
            .expect("transport mutex poisoned")
            .push(mail);
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
