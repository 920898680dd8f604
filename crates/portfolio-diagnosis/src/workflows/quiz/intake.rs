use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AssetClass, PortfolioAllocation, UserContact};

/// Path of the result page the intake step redirects to.
pub const RESULT_PATH: &str = "/result";

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    Name,
    Phone,
    Email,
    Amounts,
}

impl IntakeField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Amounts => "amounts",
        }
    }
}

/// A single reason the quiz form cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("氏名を入力してください")]
    MissingName,
    #[error("電話番号を入力してください")]
    MissingPhone,
    #[error("有効な電話番号を入力してください")]
    InvalidPhone,
    #[error("メールアドレスを入力してください")]
    MissingEmail,
    #[error("有効なメールアドレスを入力してください")]
    InvalidEmail,
    #[error("{}の金額が正しくありません", .0.label())]
    InvalidAmount(AssetClass),
    #[error("資産額を入力してください")]
    EmptyPortfolio,
}

impl IntakeViolation {
    pub const fn field(&self) -> IntakeField {
        match self {
            Self::MissingName => IntakeField::Name,
            Self::MissingPhone | Self::InvalidPhone => IntakeField::Phone,
            Self::MissingEmail | Self::InvalidEmail => IntakeField::Email,
            Self::InvalidAmount(_) | Self::EmptyPortfolio => IntakeField::Amounts,
        }
    }
}

/// Every violation found in one submission, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("submission rejected: {} field(s) need attention", .violations.len())]
pub struct IntakeErrors {
    violations: Vec<IntakeViolation>,
}

impl IntakeErrors {
    fn push(&mut self, violation: IntakeViolation) {
        let field = violation.field();
        if !self.violations.iter().any(|existing| existing.field() == field) {
            self.violations.push(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[IntakeViolation] {
        &self.violations
    }

    pub fn for_field(&self, field: IntakeField) -> Option<&IntakeViolation> {
        self.violations
            .iter()
            .find(|violation| violation.field() == field)
    }

    /// Field key to message, the shape the form renders inline.
    pub fn field_messages(&self) -> BTreeMap<&'static str, String> {
        self.violations
            .iter()
            .map(|violation| (violation.field().key(), violation.to_string()))
            .collect()
    }
}

/// Checks the contact fields the way the form does before allowing submission.
pub fn validate_contact(contact: &UserContact) -> Result<(), IntakeErrors> {
    let mut errors = IntakeErrors::default();
    collect_contact_violations(contact, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_contact_violations(contact: &UserContact, errors: &mut IntakeErrors) {
    if contact.name.trim().is_empty() {
        errors.push(IntakeViolation::MissingName);
    }

    if contact.phone.trim().is_empty() {
        errors.push(IntakeViolation::MissingPhone);
    } else if !is_valid_phone(&contact.phone) {
        errors.push(IntakeViolation::InvalidPhone);
    }

    if contact.email.trim().is_empty() {
        errors.push(IntakeViolation::MissingEmail);
    } else if !is_valid_email(&contact.email) {
        errors.push(IntakeViolation::InvalidEmail);
    }
}

/// Digits and hyphens only.
pub fn is_valid_phone(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

/// Contact details and yen amounts as entered on the quiz form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSubmission {
    #[serde(rename = "userInfo")]
    pub contact: UserContact,
    #[serde(default)]
    pub amounts: PortfolioAllocation,
}

impl PortfolioSubmission {
    /// Validates the form and builds the navigation target for the result page.
    pub fn accept(&self) -> Result<ResultLink, IntakeErrors> {
        let mut errors = IntakeErrors::default();
        collect_contact_violations(&self.contact, &mut errors);

        for (asset, amount) in self.amounts.entries() {
            if !amount.is_finite() || amount < 0.0 {
                errors.push(IntakeViolation::InvalidAmount(asset));
            }
        }

        let total_amount = self.amounts.total();
        if total_amount <= 0.0 {
            errors.push(IntakeViolation::EmptyPortfolio);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let percentages = self.amounts.to_percentages();
        let path = format!(
            "{RESULT_PATH}?{}",
            result_query_string(&percentages, &self.amounts, &self.contact, total_amount)
        );

        Ok(ResultLink {
            result_path: path,
            percentages,
            total_amount,
        })
    }
}

/// Where the browser goes after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultLink {
    pub result_path: String,
    pub percentages: PortfolioAllocation,
    pub total_amount: f64,
}

/// Encodes percentages (two decimals), `amt_` amounts, contact fields, and the total.
pub fn result_query_string(
    percentages: &PortfolioAllocation,
    amounts: &PortfolioAllocation,
    contact: &UserContact,
    total_amount: f64,
) -> String {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(18);

    for (asset, value) in percentages.entries() {
        pairs.push((asset.key().to_string(), format!("{value:.2}")));
    }
    for (asset, value) in amounts.entries() {
        pairs.push((format!("amt_{}", asset.key()), format_amount_param(value)));
    }
    pairs.push(("name".to_string(), contact.name.clone()));
    pairs.push(("phone".to_string(), contact.phone.clone()));
    pairs.push(("email".to_string(), contact.email.clone()));
    pairs.push(("total".to_string(), format_amount_param(total_amount)));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn format_amount_param(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
