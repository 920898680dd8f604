use serde::{Deserialize, Serialize};

/// Tolerance applied when checking that percentages add up to 100.
pub const PERCENT_SUM_TOLERANCE: f64 = 1.0;

/// The seven asset categories the quiz asks about, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    Stocks,
    RealEstate,
    Gold,
    MutualFunds,
    Crypto,
    Cash,
    Other,
}

impl AssetClass {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Stocks,
            Self::RealEstate,
            Self::Gold,
            Self::MutualFunds,
            Self::Crypto,
            Self::Cash,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stocks => "株式",
            Self::RealEstate => "不動産",
            Self::Gold => "金",
            Self::MutualFunds => "投信/ETF",
            Self::Crypto => "暗号通貨",
            Self::Cash => "現金",
            Self::Other => "その他",
        }
    }

    /// Label used in the admin notification, which spells the fund slash full-width.
    pub const fn admin_label(self) -> &'static str {
        match self {
            Self::MutualFunds => "投信／ETF",
            other => other.label(),
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Stocks => "📈",
            Self::RealEstate => "🏢",
            Self::Gold => "🥇",
            Self::MutualFunds => "📊",
            Self::Crypto => "₿",
            Self::Cash => "💵",
            Self::Other => "📦",
        }
    }

    /// Key used in JSON bodies and result-page query parameters.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::RealEstate => "realEstate",
            Self::Gold => "gold",
            Self::MutualFunds => "mutualFunds",
            Self::Crypto => "crypto",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }
}

/// A portfolio split across the seven asset classes.
///
/// The same shape carries absolute yen amounts and percentages; which one a value holds is
/// decided by where it came from. [`PortfolioAllocation::to_percentages`] converts the former
/// into the latter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioAllocation {
    pub stocks: f64,
    pub real_estate: f64,
    pub gold: f64,
    pub mutual_funds: f64,
    pub crypto: f64,
    pub cash: f64,
    pub other: f64,
}

impl PortfolioAllocation {
    pub fn get(&self, asset: AssetClass) -> f64 {
        match asset {
            AssetClass::Stocks => self.stocks,
            AssetClass::RealEstate => self.real_estate,
            AssetClass::Gold => self.gold,
            AssetClass::MutualFunds => self.mutual_funds,
            AssetClass::Crypto => self.crypto,
            AssetClass::Cash => self.cash,
            AssetClass::Other => self.other,
        }
    }

    pub fn set(&mut self, asset: AssetClass, value: f64) {
        let slot = match asset {
            AssetClass::Stocks => &mut self.stocks,
            AssetClass::RealEstate => &mut self.real_estate,
            AssetClass::Gold => &mut self.gold,
            AssetClass::MutualFunds => &mut self.mutual_funds,
            AssetClass::Crypto => &mut self.crypto,
            AssetClass::Cash => &mut self.cash,
            AssetClass::Other => &mut self.other,
        };
        *slot = value;
    }

    pub fn with(mut self, asset: AssetClass, value: f64) -> Self {
        self.set(asset, value);
        self
    }

    /// Every asset class with its value, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::ordered()
            .into_iter()
            .map(move |asset| (asset, self.get(asset)))
    }

    /// Entries with a strictly positive value, in canonical order.
    pub fn non_zero_entries(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.entries().filter(|(_, value)| *value > 0.0)
    }

    /// Sum of all usable values. Negative and non-finite entries count as zero.
    pub fn total(&self) -> f64 {
        self.entries().map(|(_, value)| sanitize(value)).sum()
    }

    /// Normalizes amounts into percentages of their sum. A zero sum yields all zeros.
    pub fn to_percentages(&self) -> Self {
        let total = self.total();
        let mut percentages = Self::default();
        if total <= 0.0 {
            return percentages;
        }

        for (asset, value) in self.entries() {
            percentages.set(asset, sanitize(value) / total * 100.0);
        }
        percentages
    }

    /// True when these percentages add up to 100 within [`PERCENT_SUM_TOLERANCE`].
    /// Negative and non-finite entries count as 0, so they cannot offset an oversized one.
    pub fn is_complete_percentage(&self) -> bool {
        (self.total() - 100.0).abs() <= PERCENT_SUM_TOLERANCE
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Contact details captured alongside the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}
