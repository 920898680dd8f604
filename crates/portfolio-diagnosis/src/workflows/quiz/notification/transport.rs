use async_trait::async_trait;
use serde::Serialize;

use super::smtp::SmtpMailTransport;
use super::templates::EmailBody;
use crate::config::{MailConfig, MailDelivery};

/// Mailbox used as the `From` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MailSender {
    pub name: &'static str,
    pub address: &'static str,
}

pub const USER_SENDER: MailSender = MailSender {
    name: "ポートフォリオ診断テスト",
    address: "quest@kawaraban.co.jp",
};

pub const ADMIN_SENDER: MailSender = MailSender {
    name: "ポートフォリオ診断システム",
    address: "quest@kawaraban.co.jp",
};

/// Internal recipients of every lead notification.
pub const ADMIN_RECIPIENTS: [&str; 2] = [
    "quest@kawaraban.co.jp",
    "y3awtd-hirayama-p@hdbronze.htdb.jp",
];

/// A fully rendered message addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub from: MailSender,
    pub to: Vec<String>,
    pub subject: String,
    pub body: EmailBody,
}

/// Delivery failure raised by a transport.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("message could not be built: {0}")]
    Build(String),
    #[error("smtp delivery failed: {0}")]
    Transport(String),
}

/// Outbound mail hook so the notification service can run against fakes in tests.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Writes messages to the log instead of delivering them. Nothing is retained.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailTransport;

impl LogMailTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            from = mail.from.address,
            to = ?mail.to,
            subject = %mail.subject,
            html = mail.body.is_html(),
            bytes = mail.body.as_str().len(),
            "mail delivery disabled; message logged"
        );
        tracing::debug!(body = mail.body.as_str(), "logged mail body");
        Ok(())
    }
}

/// Transport chosen from `MAIL_DELIVERY` at startup.
pub enum ConfiguredTransport {
    Smtp(SmtpMailTransport),
    Log(LogMailTransport),
}

impl ConfiguredTransport {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        match config.delivery {
            MailDelivery::Smtp => {
                if config.smtp_user.is_none() || config.smtp_pass.is_none() {
                    tracing::warn!(
                        host = %config.smtp_host,
                        "SMTP credentials are not configured; relay will likely reject mail"
                    );
                }
                Ok(Self::Smtp(SmtpMailTransport::from_config(config)?))
            }
            MailDelivery::Log => {
                tracing::warn!("MAIL_DELIVERY=log; result mails are written to the log only");
                Ok(Self::Log(LogMailTransport::new()))
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Smtp(_) => "smtp",
            Self::Log(_) => "log",
        }
    }
}

#[async_trait]
impl MailTransport for ConfiguredTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        match self {
            Self::Smtp(transport) => transport.send(mail).await,
            Self::Log(transport) => transport.send(mail).await,
        }
    }
}
