use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("invalid scoring policy value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub team: f64,
    pub market: f64,
    pub product: f64,
    pub traction: f64,
    pub funding: f64,
    pub financial_efficiency: f64,
    pub miscellaneous: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            team: 0.30,
            market: 0.20,
            product: 0.18,
            traction: 0.15,
            funding: 0.08,
            financial_efficiency: 0.07,
            miscellaneous: 0.02,
        }
    }
}

impl CategoryWeights {
    pub const fn weight(&self, category: Category) -> f64 {
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

    pub fn total(&self) -> f64 {
        Category::ALL.into_iter().map(|c| self.weight(c)).sum()
    }
}

/// Convexity bonus: above `threshold`, `score += (score - threshold) * factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostCurve {
    pub threshold: f64,
    pub factor: f64,
}

impl Default for BoostCurve {
    fn default() -> Self {
        Self {
            threshold: 60.0,
            factor: 0.15,
        }
    }
}

/// Score used for a field with no usable data, and for a category in which
/// nothing was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDefaults {
    pub team: f64,
    pub market: f64,
    pub product: f64,
    pub traction: f64,
    pub funding: f64,
    pub financial_efficiency: f64,
    pub miscellaneous: f64,
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self {
            team: 60.0,
            market: 60.0,
            product: 60.0,
            traction: 60.0,
            funding: 50.0,
            financial_efficiency: 50.0,
            miscellaneous: 50.0,
        }
    }
}

impl CategoryDefaults {
    pub const fn get(&self, category: Category) -> f64 {
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
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketPolicy {
    /// Also score SAM and SOM alongside TAM and growth.
    pub score_sub_markets: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TractionPolicy {
    /// Also score MRR and ARR text.
    pub score_revenue: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub weights: CategoryWeights,
    pub curve: BoostCurve,
    pub defaults: CategoryDefaults,
    pub market: MarketPolicy,
    pub traction: TractionPolicy,
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        for category in Category::ALL {
            let weight = self.weights.weight(category);
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(
                    format!("weights.{}", field_name(category)),
                    format!("must be a non-negative number, got {weight}"),
                ));
            }
            let default = self.defaults.get(category);
            if !default.is_finite() || !(0.0..=100.0).contains(&default) {
                return Err(invalid(
                    format!("defaults.{}", field_name(category)),
                    format!("must lie in [0, 100], got {default}"),
                ));
            }
        }

        let total = self.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(invalid(
                "weights".to_string(),
                format!("must sum to 1.0, got {total}"),
            ));
        }

        if !self.curve.threshold.is_finite() || !self.curve.factor.is_finite() {
            return Err(invalid(
                "curve".to_string(),
                "threshold and factor must be finite".to_string(),
            ));
        }
        if self.curve.factor < 0.0 {
            return Err(invalid(
                "curve.factor".to_string(),
                format!("must be non-negative, got {}", self.curve.factor),
            ));
        }

        Ok(())
    }
}

const fn field_name(category: Category) -> &'static str {
    match category {
        Category::Team => "team",
        Category::Market => "market",
        Category::Product => "product",
        Category::Traction => "traction",
        Category::Funding => "funding",
        Category::FinancialEfficiency => "financial_efficiency",
        Category::Miscellaneous => "miscellaneous",
    }
}

fn invalid(field: String, reason: String) -> PolicyError {
    PolicyError::InvalidValue { field, reason }
}
