mod catalog;
mod config;
mod rules;
mod scores;

pub use config::DiagnosisThresholds;

use super::domain::PortfolioAllocation;
use serde::{Deserialize, Serialize};

/// The five investor personalities the quiz can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisType {
    Gambler,
    Safekeeper,
    Trendy,
    Balanced,
    Landlord,
}

impl DiagnosisType {
    /// Categories in rule priority order.
    pub fn by_priority() -> impl Iterator<Item = Self> {
        rules::RULES.iter().map(|rule| rule.kind)
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Gambler => "gambler",
            Self::Safekeeper => "safekeeper",
            Self::Trendy => "trendy",
            Self::Balanced => "balanced",
            Self::Landlord => "landlord",
        }
    }

    pub fn emoji(self) -> &'static str {
        catalog::profile(self).emoji
    }

    pub fn title(self) -> &'static str {
        catalog::profile(self).title
    }
}

/// A single checkpoint suggested for the new year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupAdvice {
    pub action: &'static str,
    pub description: &'static str,
}

/// Radar-chart scores, each in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisStats {
    pub attack: u8,
    pub defense: u8,
    pub liquidity: u8,
    pub inflation_resist: u8,
}

/// Full diagnosis for one allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    #[serde(rename = "type")]
    pub kind: DiagnosisType,
    pub emoji: &'static str,
    pub title: &'static str,
    pub condition: String,
    pub diagnosis: &'static str,
    pub news_forecast: &'static str,
    pub cleanup_advice: Vec<CleanupAdvice>,
    pub stats: DiagnosisStats,
}

/// Stateless evaluator that applies the threshold table to an allocation.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisEngine {
    thresholds: DiagnosisThresholds,
}

impl DiagnosisEngine {
    pub fn new(thresholds: DiagnosisThresholds) -> Self {
        Self { thresholds }
    }

    /// Classifies percentages and derives scores. Never fails; callers gate on the
    /// percentage sum before calling.
    pub fn diagnose(&self, allocation: &PortfolioAllocation) -> DiagnosisResult {
        let kind = rules::classify(allocation, &self.thresholds);
        let profile = catalog::profile(kind);

        DiagnosisResult {
            kind,
            emoji: profile.emoji,
            title: profile.title,
            condition: rules::condition_text(kind, &self.thresholds),
            diagnosis: profile.diagnosis,
            news_forecast: profile.news_forecast,
            cleanup_advice: profile.cleanup_advice.to_vec(),
            stats: scores::score_allocation(allocation),
        }
    }
}

/// Diagnoses with the default thresholds.
pub fn diagnose(allocation: &PortfolioAllocation) -> DiagnosisResult {
    DiagnosisEngine::default().diagnose(allocation)
}
