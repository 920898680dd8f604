use serde::Serialize;

use super::diagnosis::{DiagnosisEngine, DiagnosisResult};
use super::domain::{AssetClass, PortfolioAllocation, UserContact};
use super::notification::EmailRequest;

const EMPTY_MESSAGE: &str = "ポートフォリオデータが見つかりません";
const EMPTY_HINT: &str = "まずはポートフォリオを入力してください";
const HOME_PATH: &str = "/";
const HOME_LABEL: &str = "トップに戻る";

/// Result-page query parameters as produced by the intake step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultQuery {
    pub percentages: PortfolioAllocation,
    pub amounts: PortfolioAllocation,
    pub contact: UserContact,
    pub total_amount: f64,
}

impl ResultQuery {
    /// Parses a raw query string. Missing or unparsable numbers read as 0; a query that
    /// cannot be decoded at all reads as empty.
    pub fn parse(raw: &str) -> Self {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(raw.trim_start_matches('?')) {
            Ok(pairs) => Self::from_pairs(pairs),
            Err(err) => {
                tracing::debug!(error = %err, "result query could not be decoded");
                Self::default()
            }
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.contact.name = value,
                "phone" => query.contact.phone = value,
                "email" => query.contact.email = value,
                "total" => query.total_amount = parse_number(&value),
                other => {
                    if let Some(asset) = other.strip_prefix("amt_").and_then(asset_for_key) {
                        query.amounts.set(asset, parse_number(&value));
                    } else if let Some(asset) = asset_for_key(other) {
                        query.percentages.set(asset, parse_number(&value));
                    }
                }
            }
        }
        query
    }
}

fn asset_for_key(key: &str) -> Option<AssetClass> {
    AssetClass::ordered()
        .into_iter()
        .find(|asset| asset.key() == key)
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// One non-zero slice of the allocation as the result page lists it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub percentage: f64,
    pub amount: f64,
}

/// Navigation target offered from the empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// What the result page shows for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultView {
    Empty {
        message: &'static str,
        hint: &'static str,
        link: HomeLink,
    },
    #[serde(rename_all = "camelCase")]
    Diagnosed {
        total_amount: f64,
        breakdown: Vec<BreakdownEntry>,
        diagnosis: DiagnosisResult,
        email_request: EmailRequest,
    },
}

impl ResultView {
    /// Diagnoses the query when its percentages sum into the accepted band.
    pub fn build(engine: &DiagnosisEngine, query: &ResultQuery) -> Self {
        if !query.percentages.is_complete_percentage() {
            return Self::Empty {
                message: EMPTY_MESSAGE,
                hint: EMPTY_HINT,
                link: HomeLink {
                    href: HOME_PATH,
                    label: HOME_LABEL,
                },
            };
        }

        let diagnosis = engine.diagnose(&query.percentages);
        let breakdown = query
            .percentages
            .non_zero_entries()
            .map(|(asset, percentage)| BreakdownEntry {
                key: asset.key(),
                label: asset.label(),
                emoji: asset.emoji(),
                percentage,
                amount: query.amounts.get(asset),
            })
            .collect();

        let mut email_request =
            EmailRequest::from_diagnosis(query.contact.clone(), query.amounts, &diagnosis);
        email_request.portfolio = query.percentages;
        email_request.total_amount = query.total_amount;

        Self::Diagnosed {
            total_amount: query.total_amount,
            breakdown,
            diagnosis,
            email_request,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}
