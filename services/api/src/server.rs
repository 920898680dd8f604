use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use portfolio_diagnosis::config::AppConfig;
use portfolio_diagnosis::error::AppError;
use portfolio_diagnosis::telemetry;
use portfolio_diagnosis::workflows::quiz::notification::{ConfiguredTransport, NotificationService};
use portfolio_diagnosis::workflows::quiz::QuizService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let transport = Arc::new(ConfiguredTransport::from_config(&config.mail)?);
    info!(
        delivery = transport.label(),
        smtp_host = %config.mail.smtp_host,
        smtp_port = config.mail.smtp_port,
        "mail transport configured"
    );
    let notifications = NotificationService::new(transport, &config.mail);
    let quiz_service = Arc::new(QuizService::new(notifications));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "portfolio diagnosis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
