use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::request::EmailRequest;
use super::templates::{
    render_admin_email, render_user_email, AdminBreakdown, AdminFormat, BreakdownKind,
};
use super::transport::{
    MailError, MailTransport, OutgoingMail, ADMIN_RECIPIENTS, ADMIN_SENDER, USER_SENDER,
};
use crate::config::MailConfig;

/// Connection facts echoed in failure responses. Never carries the credentials themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDiagnostics {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(rename = "smtpUser", serialize_with = "configured_label")]
    pub smtp_user_configured: bool,
}

fn configured_label<S: Serializer>(configured: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *configured { "設定済み" } else { "未設定" })
}

/// Shape of the admin notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub admin_format: AdminFormat,
    pub admin_breakdown: BreakdownKind,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            admin_format: AdminFormat::Text,
            admin_breakdown: BreakdownKind::Amounts,
        }
    }
}

/// Both messages produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationBatch {
    pub user: OutgoingMail,
    pub admin: OutgoingMail,
}

/// Who was mailed for a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub user_recipient: String,
    pub admin_recipients: Vec<String>,
}

/// Renders and sends the user report and the admin lead notification.
pub struct NotificationService<M> {
    transport: Arc<M>,
    settings: NotificationSettings,
    diagnostics: TransportDiagnostics,
}

impl<M> NotificationService<M>
where
    M: MailTransport + 'static,
{
    pub fn new(transport: Arc<M>, config: &MailConfig) -> Self {
        Self::with_settings(
            transport,
            NotificationSettings {
                admin_format: config.admin_format,
                admin_breakdown: config.admin_breakdown,
            },
            config.diagnostics(),
        )
    }

    pub fn with_settings(
        transport: Arc<M>,
        settings: NotificationSettings,
        diagnostics: TransportDiagnostics,
    ) -> Self {
        Self {
            transport,
            settings,
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &TransportDiagnostics {
        &self.diagnostics
    }

    /// Renders both messages without sending anything.
    pub fn compose(
        &self,
        request: &EmailRequest,
        submitted_at: DateTime<Utc>,
    ) -> NotificationBatch {
        let outcome = &request.diagnosis_result;

        let user_document = render_user_email(
            &request.user_info,
            &request.portfolio,
            request.total_amount,
            outcome,
        );
        let breakdown = AdminBreakdown::select(
            self.settings.admin_breakdown,
            &request.amounts,
            &request.portfolio,
        );
        let admin_document = render_admin_email(
            &request.user_info,
            breakdown,
            outcome,
            submitted_at,
            self.settings.admin_format,
        );

        NotificationBatch {
            user: OutgoingMail {
                from: USER_SENDER,
                to: vec![request.user_info.email.trim().to_string()],
                subject: user_document.subject,
                body: user_document.body,
            },
            admin: OutgoingMail {
                from: ADMIN_SENDER,
                to: ADMIN_RECIPIENTS.iter().map(|address| address.to_string()).collect(),
                subject: admin_document.subject,
                body: admin_document.body,
            },
        }
    }

    /// Sends the user report, then the admin notification. The admin mail is not attempted
    /// when the user mail fails.
    pub async fn deliver(
        &self,
        request: &EmailRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<DeliveryReceipt, NotificationError> {
        let batch = self.compose(request, submitted_at);
        let receipt = DeliveryReceipt {
            user_recipient: batch.user.to.join(", "),
            admin_recipients: batch.admin.to.clone(),
        };

        self.transport
            .send(batch.user)
            .await
            .map_err(NotificationError::User)?;
        tracing::info!(recipient = %receipt.user_recipient, "user result mail sent");

        self.transport
            .send(batch.admin)
            .await
            .map_err(NotificationError::Admin)?;
        tracing::info!(recipients = ?receipt.admin_recipients, "admin notification sent");

        Ok(receipt)
    }
}

/// Error raised while delivering the result mails.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("user mail failed: {0}")]
    User(#[source] MailError),
    #[error("admin mail failed: {0}")]
    Admin(#[source] MailError),
}
