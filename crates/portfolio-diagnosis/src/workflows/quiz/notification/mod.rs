//! Result e-mail rendering and delivery.

pub mod format;
mod request;
mod service;
mod smtp;
mod templates;
mod transport;

pub use request::{EmailRequest, ReportedAdvice, ReportedDiagnosis, ReportedStats};
pub use service::{
    DeliveryReceipt, NotificationBatch, NotificationError, NotificationService,
    NotificationSettings, TransportDiagnostics,
};
pub use smtp::SmtpMailTransport;
pub use templates::{
    admin_subject, render_admin_email, render_user_email, user_subject, AdminBreakdown,
    AdminFormat, BreakdownKind, EmailBody, EmailDocument,
};
pub use transport::{
    ConfiguredTransport, LogMailTransport, MailError, MailSender, MailTransport, OutgoingMail,
    ADMIN_RECIPIENTS, ADMIN_SENDER, USER_SENDER,
};
