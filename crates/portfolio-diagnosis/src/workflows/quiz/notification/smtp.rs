use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::templates::EmailBody;
use super::transport::{MailError, MailSender, MailTransport, OutgoingMail};
use crate::config::MailConfig;

/// STARTTLS relay client authenticated with the configured SMTP credentials.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailError> {
    let parsed = address
        .trim()
        .parse::<Address>()
        .map_err(|err| MailError::Address {
            address: address.to_string(),
            reason: err.to_string(),
        })?;
    Ok(Mailbox::new(name.map(str::to_string), parsed))
}

fn sender_mailbox(sender: MailSender) -> Result<Mailbox, MailError> {
    mailbox(Some(sender.name), sender.address)
}

fn build_message(mail: OutgoingMail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(sender_mailbox(mail.from)?)
        .subject(mail.subject);
    for recipient in &mail.to {
        builder = builder.to(mailbox(None, recipient)?);
    }

    let (content_type, body) = match mail.body {
        EmailBody::Html(body) => (ContentType::TEXT_HTML, body),
        EmailBody::Text(body) => (ContentType::TEXT_PLAIN, body),
    };

    builder
        .header(content_type)
        .body(body)
        .map_err(|err| MailError::Build(err.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let recipients = mail.to.len();
        let message = build_message(mail)?;
        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        tracing::debug!(
            recipients,
            code = %response.code(),
            "smtp relay accepted message"
        );
        Ok(())
    }
}
