use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::intake::PortfolioSubmission;
use super::notification::{EmailRequest, MailTransport, TransportDiagnostics};
use super::result_view::ResultQuery;
use super::service::QuizService;

const SEND_SUCCESS_MESSAGE: &str = "メール送信が完了しました";
const SEND_FAILURE_MESSAGE: &str = "メール送信に失敗しました";

/// Router builder exposing the quiz submission, result, and e-mail endpoints.
pub fn quiz_router<M>(service: Arc<QuizService<M>>) -> Router
where
    M: MailTransport + 'static,
{
    Router::new()
        .route("/api/v1/portfolio/submit", post(submit_handler::<M>))
        .route("/api/v1/portfolio/result", get(result_handler::<M>))
        .route("/api/send-email", post(send_email_handler::<M>))
        .with_state(service)
}

pub(crate) async fn submit_handler<M>(
    State(service): State<Arc<QuizService<M>>>,
    Json(submission): Json<PortfolioSubmission>,
) -> Response
where
    M: MailTransport + 'static,
{
    match service.submit(&submission) {
        Ok(link) => (StatusCode::OK, Json(link)).into_response(),
        Err(errors) => {
            tracing::debug!(fields = errors.violations().len(), "quiz submission rejected");
            let payload = json!({
                "errors": errors.field_messages(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_handler<M>(
    State(service): State<Arc<QuizService<M>>>,
    RawQuery(raw): RawQuery,
) -> Response
where
    M: MailTransport + 'static,
{
    let query = ResultQuery::parse(raw.as_deref().unwrap_or_default());
    let view = service.result(&query);
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn send_email_handler<M>(
    State(service): State<Arc<QuizService<M>>>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Response
where
    M: MailTransport + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let detail = rejection.body_text();
            tracing::error!(error = %detail, "send-email payload rejected");
            return failure_response(service.notifications().diagnostics(), detail);
        }
    };

    match service.send_results(&request).await {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": SEND_SUCCESS_MESSAGE,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "result mail delivery failed");
            failure_response(service.notifications().diagnostics(), error.to_string())
        }
    }
}

fn failure_response(diagnostics: &TransportDiagnostics, error: String) -> Response {
    let payload = json!({
        "success": false,
        "message": SEND_FAILURE_MESSAGE,
        "error": error,
        "debug": diagnostics,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
