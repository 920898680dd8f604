use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::diagnosis::DiagnosisEngine;
use super::intake::{IntakeErrors, PortfolioSubmission, ResultLink};
use super::notification::{
    DeliveryReceipt, EmailRequest, MailTransport, NotificationError, NotificationService,
};
use super::result_view::{ResultQuery, ResultView};

/// Service composing intake validation, the diagnosis engine, and result mail delivery.
pub struct QuizService<M> {
    engine: Arc<DiagnosisEngine>,
    notifications: NotificationService<M>,
}

impl<M> QuizService<M>
where
    M: MailTransport + 'static,
{
    pub fn new(notifications: NotificationService<M>) -> Self {
        Self::with_engine(DiagnosisEngine::default(), notifications)
    }

    pub fn with_engine(engine: DiagnosisEngine, notifications: NotificationService<M>) -> Self {
        Self {
            engine: Arc::new(engine),
            notifications,
        }
    }

    pub fn notifications(&self) -> &NotificationService<M> {
        &self.notifications
    }

    /// Validate the form and return the result-page link.
    pub fn submit(&self, submission: &PortfolioSubmission) -> Result<ResultLink, IntakeErrors> {
        submission.accept()
    }

    /// Build the result page for the given query parameters.
    pub fn result(&self, query: &ResultQuery) -> ResultView {
        ResultView::build(&self.engine, query)
    }

    /// Send the user report and the admin notification, stamped with the current time.
    pub async fn send_results(
        &self,
        request: &EmailRequest,
    ) -> Result<DeliveryReceipt, NotificationError> {
        self.send_results_at(request, Utc::now()).await
    }

    pub async fn send_results_at(
        &self,
        request: &EmailRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<DeliveryReceipt, NotificationError> {
        self.notifications.deliver(request, submitted_at).await
    }
}
