use metrics_exporter_prometheus::PrometheusHandle;
use portfolio_diagnosis::workflows::quiz::notification::{AdminFormat, BreakdownKind};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_admin_format(raw: &str) -> Result<AdminFormat, String> {
    AdminFormat::parse(raw)
        .ok_or_else(|| format!("unsupported admin format '{raw}' (text or html)"))
}

pub(crate) fn parse_breakdown(raw: &str) -> Result<BreakdownKind, String> {
    BreakdownKind::parse(raw)
        .ok_or_else(|| format!("unsupported breakdown '{raw}' (amounts or percentages)"))
}
