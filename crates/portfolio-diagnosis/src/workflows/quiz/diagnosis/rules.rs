use super::super::domain::PortfolioAllocation;
use super::config::DiagnosisThresholds;
use super::DiagnosisType;

/// One row of the decision table.
pub(crate) struct DiagnosisRule {
    pub kind: DiagnosisType,
    pub matches: fn(&PortfolioAllocation, &DiagnosisThresholds) -> bool,
}

/// Classification rules in priority order. The final rule always matches.
pub(crate) static RULES: [DiagnosisRule; 5] = [
    DiagnosisRule {
        kind: DiagnosisType::Gambler,
        matches: is_speculative,
    },
    DiagnosisRule {
        kind: DiagnosisType::Safekeeper,
        matches: is_conservative,
    },
    DiagnosisRule {
        kind: DiagnosisType::Balanced,
        matches: is_fund_dominant,
    },
    DiagnosisRule {
        kind: DiagnosisType::Landlord,
        matches: is_real_estate_dominant,
    },
    DiagnosisRule {
        kind: DiagnosisType::Trendy,
        matches: always,
    },
];

fn is_speculative(p: &PortfolioAllocation, t: &DiagnosisThresholds) -> bool {
    p.stocks + p.crypto >= t.speculative_min_pct
}

fn is_conservative(p: &PortfolioAllocation, t: &DiagnosisThresholds) -> bool {
    p.cash + p.gold >= t.conservative_min_pct
}

fn is_fund_dominant(p: &PortfolioAllocation, t: &DiagnosisThresholds) -> bool {
    p.mutual_funds >= t.fund_dominant_min_pct
}

fn is_real_estate_dominant(p: &PortfolioAllocation, t: &DiagnosisThresholds) -> bool {
    p.real_estate >= t.real_estate_dominant_min_pct
}

fn always(_: &PortfolioAllocation, _: &DiagnosisThresholds) -> bool {
    true
}

pub(crate) fn classify(
    allocation: &PortfolioAllocation,
    thresholds: &DiagnosisThresholds,
) -> DiagnosisType {
    RULES
        .iter()
        .find(|rule| (rule.matches)(allocation, thresholds))
        .map(|rule| rule.kind)
        .unwrap_or(DiagnosisType::Trendy)
}

/// Human-readable predicate for a category under the given thresholds.
pub(crate) fn condition_text(kind: DiagnosisType, thresholds: &DiagnosisThresholds) -> String {
    match kind {
        DiagnosisType::Gambler => format!(
            "株式＋暗号通貨が{}%以上",
            thresholds.speculative_min_pct
        ),
        DiagnosisType::Safekeeper => {
            format!("現金＋金が{}%以上", thresholds.conservative_min_pct)
        }
        DiagnosisType::Balanced => {
            format!("投信/ETFが{}%以上", thresholds.fund_dominant_min_pct)
        }
        DiagnosisType::Landlord => {
            format!("不動産が{}%以上", thresholds.real_estate_dominant_min_pct)
        }
        DiagnosisType::Trendy => "上記のいずれにも当てはまらない".to_string(),
    }
}
