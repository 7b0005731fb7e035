use serde::Deserialize;

use crate::table::Keyed;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub country_long_name: String,
    /// Used as a market-stability proxy.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub corruption_score: Option<f64>,
}

impl Keyed for Country {
    fn keys(&self) -> Vec<&str> {
        vec![self.country_name.as_str(), self.country_long_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Degree {
    #[serde(default)]
    pub full_name: String,
}

impl Keyed for Degree {
    fn keys(&self) -> Vec<&str> {
        vec![self.full_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fortune500Company {
    #[serde(default)]
    pub name: String,
}

impl Keyed for Fortune500Company {
    fn keys(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FundingStage {
    #[serde(default)]
    pub stage: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub stage_level: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub score: Option<f64>,
}

impl Keyed for FundingStage {
    fn keys(&self) -> Vec<&str> {
        vec![self.stage.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HardCompany {
    #[serde(default)]
    pub company: String,
}

impl Keyed for HardCompany {
    fn keys(&self) -> Vec<&str> {
        vec![self.company.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndustryKeyword {
    #[serde(default)]
    pub keyword: String,
}

impl Keyed for IndustryKeyword {
    fn keys(&self) -> Vec<&str> {
        vec![self.keyword.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankedInvestor {
    #[serde(default)]
    pub investor_name: String,
    /// 1 is the best rank.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub investor_rank: Option<f64>,
}

impl Keyed for RankedInvestor {
    fn keys(&self) -> Vec<&str> {
        vec![self.investor_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductStage {
    #[serde(default)]
    pub stage: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub score: Option<f64>,
}

impl Keyed for ProductStage {
    fn keys(&self) -> Vec<&str> {
        vec![self.stage.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct University {
    #[serde(default)]
    pub institution: String,
}

impl Keyed for University {
    fn keys(&self) -> Vec<&str> {
        vec![self.institution.as_str()]
    }
}
