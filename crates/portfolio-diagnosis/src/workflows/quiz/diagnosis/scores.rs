use super::super::domain::{AssetClass, PortfolioAllocation};
use super::DiagnosisStats;

/// Per-asset weights in canonical asset order.
type Weights = [f64; 7];

const ATTACK: Weights = [1.0, 0.4, 0.2, 0.6, 1.5, 0.0, 0.3];
const DEFENSE: Weights = [0.2, 0.6, 0.8, 0.5, 0.0, 1.0, 0.4];
const LIQUIDITY: Weights = [0.8, 0.1, 0.5, 0.8, 0.6, 1.0, 0.3];
const INFLATION_RESIST: Weights = [0.7, 1.0, 1.0, 0.6, 0.6, 0.0, 0.4];

pub(crate) fn score_allocation(allocation: &PortfolioAllocation) -> DiagnosisStats {
    DiagnosisStats {
        attack: weighted_score(allocation, &ATTACK),
        defense: weighted_score(allocation, &DEFENSE),
        liquidity: weighted_score(allocation, &LIQUIDITY),
        inflation_resist: weighted_score(allocation, &INFLATION_RESIST),
    }
}

fn weighted_score(allocation: &PortfolioAllocation, weights: &Weights) -> u8 {
    let raw: f64 = AssetClass::ordered()
        .into_iter()
        .zip(weights.iter())
        .map(|(asset, weight)| {
            let value = allocation.get(asset);
            if value.is_finite() {
                value * weight
            } else {
                0.0
            }
        })
        .sum();

    raw.clamp(0.0, 100.0).round() as u8
}
