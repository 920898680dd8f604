use serde::{Deserialize, Serialize};

/// Percentage thresholds that drive the classification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisThresholds {
    /// Minimum stocks + crypto share for the speculative profile.
    pub speculative_min_pct: f64,
    /// Minimum cash + gold share for the conservative profile.
    pub conservative_min_pct: f64,
    pub fund_dominant_min_pct: f64,
    pub real_estate_dominant_min_pct: f64,
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        Self {
            speculative_min_pct: 60.0,
            conservative_min_pct: 60.0,
            fund_dominant_min_pct: 40.0,
            real_estate_dominant_min_pct: 40.0,
        }
    }
}
