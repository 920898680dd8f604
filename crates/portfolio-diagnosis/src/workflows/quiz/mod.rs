//! Portfolio personality quiz: intake, diagnosis, result view, and e-mail notification.

pub mod diagnosis;
pub mod domain;
pub mod intake;
pub mod notification;
pub mod result_view;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use diagnosis::{
    diagnose, CleanupAdvice, DiagnosisEngine, DiagnosisResult, DiagnosisStats, DiagnosisThresholds,
    DiagnosisType,
};
pub use domain::{AssetClass, PortfolioAllocation, UserContact};
pub use intake::{
    validate_contact, IntakeErrors, IntakeField, IntakeViolation, PortfolioSubmission, ResultLink,
};
pub use result_view::{BreakdownEntry, ResultQuery, ResultView};
pub use router::quiz_router;
pub use service::QuizService;
