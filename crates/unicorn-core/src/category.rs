use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Team,
    Market,
    Product,
    Traction,
    Funding,
    FinancialEfficiency,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Team,
        Self::Market,
        Self::Product,
        Self::Traction,
        Self::Funding,
        Self::FinancialEfficiency,
        Self::Miscellaneous,
    ];

    /// Key used in the metrics object.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Team => "Team",
            Self::Market => "Market",
            Self::Product => "Product",
            Self::Traction => "Traction",
            Self::Funding => "Funding",
            Self::FinancialEfficiency => "Financial Efficiency",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven category scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "Team")]
    pub team: u8,
    #[serde(rename = "Market")]
    pub market: u8,
    #[serde(rename = "Product")]
    pub product: u8,
    #[serde(rename = "Traction")]
    pub traction: u8,
    #[serde(rename = "Funding")]
    pub funding: u8,
    #[serde(rename = "Financial Efficiency")]
    pub financial_efficiency: u8,
    #[serde(rename = "Miscellaneous")]
    pub miscellaneous: u8,
}

impl CategoryScores {
    pub const fn get(&self, category: Category) -> u8 {
        match category {
            Category::Team => self.team,
            Category::Market => self.market,
            Category::Product => self.product,
            Category::Traction => self.traction,
            Category::Funding => self.funding,
            Category::FinancialEfficiency => self.financial_efficiency,
            Category::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn set(&mut self, category: Category, score: u8) {
        let slot = match category {
            Category::Team => &mut self.team,
            Category::Market => &mut self.market,
            Category::Product => &mut self.product,
            Category::Traction => &mut self.traction,
            Category::Funding => &mut self.funding,
            Category::FinancialEfficiency => &mut self.financial_efficiency,
            Category::Miscellaneous => &mut self.miscellaneous,
        };
        *slot = score.min(100);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Evaluation result: the category scores plus the overall `UnicornScore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(flatten)]
    pub categories: CategoryScores,
    #[serde(rename = "UnicornScore")]
    pub unicorn_score: u8,
}

impl Metrics {
    pub const fn get(&self, category: Category) -> u8 {
        self.categories.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metrics_serialize_with_display_keys() {
        let mut categories = CategoryScores::default();
        for (i, c) in Category::ALL.into_iter().enumerate() {
            categories.set(c, 50 + i as u8);
        }
        let metrics = Metrics {
            categories,
            unicorn_score: 58,
        };

        let value = serde_json::to_value(metrics).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "Team": 50,
                "Market": 51,
                "Product": 52,
                "Traction": 53,
                "Funding": 54,
                "Financial Efficiency": 55,
                "Miscellaneous": 56,
                "UnicornScore": 58
            })
        );

        let back: Metrics = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, metrics);
    }

    #[test]
    fn set_clamps_to_hundred() {
        let mut scores = CategoryScores::default();
        scores.set(Category::Funding, 140);
        assert_eq!(scores.get(Category::Funding), 100);
    }
}
