//! Typed, lenient view of a startup profile document.
//!
//! Every field is optional. Missing keys, `null`, blank strings and values of
//! the wrong JSON type all read as unknown.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicorn_core::Scalar;

use crate::error::EvalError;
use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartupProfile {
    #[serde(default, deserialize_with = "lenient::section")]
    pub team: Option<Team>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub market: Option<Market>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub product: Option<Product>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub traction: Option<Traction>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub funding: Option<Funding>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub financial_efficiency: Option<FinancialEfficiency>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub miscellaneous: Option<Miscellaneous>,
}

impl StartupProfile {
    /// Reads a profile document. Fails only when the top level is not an
    /// object.
    pub fn from_value(value: &Value) -> Result<Self, EvalError> {
        if !value.is_object() {
            return Err(EvalError::StructuralInput(format!(
                "expected an object, found {}",
                json_kind(value)
            )));
        }
        Self::deserialize(value).map_err(|e| EvalError::StructuralInput(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient::list")]
    pub founders: Vec<Founder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub background: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub network_strength: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub age: Option<Scalar>,
    /// Carried through but never scored.
    #[serde(default, deserialize_with = "lenient::text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub previous_employments: Vec<Employment>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub linkedin_posts_last_30d: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    #[serde(default, deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    #[serde(rename = "TAM", default, deserialize_with = "lenient::scalar")]
    pub tam: Option<Scalar>,
    #[serde(rename = "SAM", default, deserialize_with = "lenient::scalar")]
    pub sam: Option<Scalar>,
    #[serde(rename = "SOM", default, deserialize_with = "lenient::scalar")]
    pub som: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub growth_rate: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::text")]
    pub stage: Option<String>,
    #[serde(rename = "USP", default, deserialize_with = "lenient::text")]
    pub usp: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_acquisition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traction {
    #[serde(default, deserialize_with = "lenient::section")]
    pub revenue_growth: Option<RevenueGrowth>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_growth: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub engagement: Option<String>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub customer_validation: Option<CustomerValidation>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub google_trend_score: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueGrowth {
    #[serde(rename = "MRR", default, deserialize_with = "lenient::text")]
    pub mrr: Option<String>,
    #[serde(rename = "ARR", default, deserialize_with = "lenient::text")]
    pub arr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerValidation {
    #[serde(default, deserialize_with = "lenient::text")]
    pub testimonials: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub churn: Option<String>,
    #[serde(rename = "NPS", default, deserialize_with = "lenient::text")]
    pub nps: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    #[serde(default, deserialize_with = "lenient::text")]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cap_table_strength: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub investors_on_board: Vec<Investor>,
}

/// A board investor. A bare string in the list is read as the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "InvestorRepr")]
pub struct Investor {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InvestorRepr {
    Name(String),
    Entry {
        #[serde(default, deserialize_with = "lenient::text")]
        name: Option<String>,
        #[serde(rename = "type", default, deserialize_with = "lenient::text")]
        kind: Option<String>,
    },
}

impl From<InvestorRepr> for Investor {
    fn from(repr: InvestorRepr) -> Self {
        match repr {
            InvestorRepr::Name(name) => Self {
                name: Some(name).filter(|n| !n.trim().is_empty()),
                kind: None,
            },
            InvestorRepr::Entry { name, kind } => Self { name, kind },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialEfficiency {
    #[serde(default, deserialize_with = "lenient::text")]
    pub burn_rate: Option<String>,
    #[serde(rename = "CAC_vs_LTV", default, deserialize_with = "lenient::text")]
    pub cac_vs_ltv: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit_economics: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Miscellaneous {
    #[serde(default, deserialize_with = "lenient::text")]
    pub geographic_focus: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timing_fad_risk: Option<String>,
}
