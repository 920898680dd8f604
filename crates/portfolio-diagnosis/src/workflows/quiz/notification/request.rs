use serde::{Deserialize, Serialize};

use super::super::diagnosis::{DiagnosisResult, DiagnosisStats, DiagnosisType};
use super::super::domain::{PortfolioAllocation, UserContact};

/// Body of the send-email call. The diagnosis is computed by the caller and passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub user_info: UserContact,
    /// Percentages.
    #[serde(default)]
    pub portfolio: PortfolioAllocation,
    /// Yen amounts.
    #[serde(default)]
    pub amounts: PortfolioAllocation,
    #[serde(default)]
    pub total_amount: f64,
    pub diagnosis_result: ReportedDiagnosis,
}

/// Diagnosis as transmitted by the result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedDiagnosis {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosisType>,
    pub emoji: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub diagnosis: String,
    pub news_forecast: String,
    #[serde(default)]
    pub cleanup_advice: Vec<ReportedAdvice>,
    pub stats: ReportedStats,
}

/// Scores as the caller sent them. Rendered verbatim, so fractional or out-of-range
/// values are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedStats {
    pub attack: f64,
    pub defense: f64,
    pub liquidity: f64,
    pub inflation_resist: f64,
}

impl From<DiagnosisStats> for ReportedStats {
    fn from(stats: DiagnosisStats) -> Self {
        Self {
            attack: f64::from(stats.attack),
            defense: f64::from(stats.defense),
            liquidity: f64::from(stats.liquidity),
            inflation_resist: f64::from(stats.inflation_resist),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedAdvice {
    pub action: String,
    pub description: String,
}

impl From<&DiagnosisResult> for ReportedDiagnosis {
    fn from(result: &DiagnosisResult) -> Self {
        Self {
            kind: Some(result.kind),
            emoji: result.emoji.to_string(),
            title: result.title.to_string(),
            condition: Some(result.condition.clone()),
            diagnosis: result.diagnosis.to_string(),
            news_forecast: result.news_forecast.to_string(),
            cleanup_advice: result
                .cleanup_advice
                .iter()
                .map(|advice| ReportedAdvice {
                    action: advice.action.to_string(),
                    description: advice.description.to_string(),
                })
                .collect(),
            stats: ReportedStats::from(result.stats),
        }
    }
}

impl EmailRequest {
    /// Assembles the pass-through body from a diagnosis computed for `amounts`.
    pub fn from_diagnosis(
        contact: UserContact,
        amounts: PortfolioAllocation,
        result: &DiagnosisResult,
    ) -> Self {
        Self {
            user_info: contact,
            portfolio: amounts.to_percentages(),
            total_amount: amounts.total(),
            amounts,
            diagnosis_result: ReportedDiagnosis::from(result),
        }
    }
}
