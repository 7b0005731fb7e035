//! Reference tables for startup scoring.
//!
//! Nine semicolon-delimited files are loaded once from a directory into typed
//! records. A table whose file is missing or unreadable is replaced by an
//! empty table, which every lookup treats exactly like "no match".

use std::path::Path;

use serde::de::DeserializeOwned;

pub mod error;
pub mod records;
pub mod table;

pub use error::ReferenceError;
pub use records::*;
pub use table::{Keyed, Table};

pub const COUNTRIES_FILE: &str = "countries.csv";
pub const DEGREES_FILE: &str = "degrees.csv";
pub const FORTUNE500_FILE: &str = "fortune500.csv";
pub const FUNDING_FILE: &str = "funding.csv";
pub const HARDEST_COMPANIES_FILE: &str = "hardest_companies.csv";
pub const INDUSTRIES_FILE: &str = "industries.csv";
pub const INVESTORS_FILE: &str = "investors.csv";
pub const PRODUCT_STAGES_FILE: &str = "productstages.csv";
pub const UNIVERSITIES_FILE: &str = "universities.csv";

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub countries: Table<Country>,
    pub degrees: Table<Degree>,
    pub fortune500: Table<Fortune500Company>,
    pub funding_stages: Table<FundingStage>,
    pub hardest_companies: Table<HardCompany>,
    pub industries: Table<IndustryKeyword>,
    pub investors: Table<RankedInvestor>,
    pub product_stages: Table<ProductStage>,
    pub universities: Table<University>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::empty()
    }
}

impl ReferenceTables {
    pub fn empty() -> Self {
        Self {
            countries: Table::empty("countries"),
            degrees: Table::empty("degrees"),
            fortune500: Table::empty("fortune500"),
            funding_stages: Table::empty("funding"),
            hardest_companies: Table::empty("hardest_companies"),
            industries: Table::empty("industries"),
            investors: Table::empty("investors"),
            product_stages: Table::empty("productstages"),
            universities: Table::empty("universities"),
        }
    }

    /// Loads every table from `dir`. Never fails: unreadable tables come
    /// back empty and are reported through `tracing`.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::warn!(
                dir = %dir.display(),
                "reference directory not found; all lookups will miss"
            );
            return Self::empty();
        }

        Self {
            countries: load_or_empty(dir, "countries", COUNTRIES_FILE),
            degrees: load_or_empty(dir, "degrees", DEGREES_FILE),
            fortune500: load_or_empty(dir, "fortune500", FORTUNE500_FILE),
            funding_stages: load_or_empty(dir, "funding", FUNDING_FILE),
            hardest_companies: load_or_empty(dir, "hardest_companies", HARDEST_COMPANIES_FILE),
            industries: load_or_empty(dir, "industries", INDUSTRIES_FILE),
            investors: load_or_empty(dir, "investors", INVESTORS_FILE),
            product_stages: load_or_empty(dir, "productstages", PRODUCT_STAGES_FILE),
            universities: load_or_empty(dir, "universities", UNIVERSITIES_FILE),
        }
    }

    /// Row count per table, keyed by table name.
    pub fn summary(&self) -> serde_json::Value {
        let counts = [
            (self.countries.name(), self.countries.len()),
            (self.degrees.name(), self.degrees.len()),
            (self.fortune500.name(), self.fortune500.len()),
            (self.funding_stages.name(), self.funding_stages.len()),
            (self.hardest_companies.name(), self.hardest_companies.len()),
            (self.industries.name(), self.industries.len()),
            (self.investors.name(), self.investors.len()),
            (self.product_stages.name(), self.product_stages.len()),
            (self.universities.name(), self.universities.len()),
        ];
        counts
            .into_iter()
            .map(|(name, rows)| (name.to_string(), serde_json::Value::from(rows)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

/// Reads one table. Rows that fail to deserialize are skipped; a missing
/// file or unreadable header is an error.
pub fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, ReferenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ReferenceError::MissingDirectory(parent.to_path_buf()));
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader.headers()?;

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<R>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => tracing::debug!(
                file = %path.display(),
                line = idx + 2,
                %err,
                "skipping malformed reference row"
            ),
        }
    }
    Ok(rows)
}

fn load_or_empty<R>(dir: &Path, name: &'static str, file: &str) -> Table<R>
where
    R: Keyed + DeserializeOwned,
{
    let path = dir.join(file);
    match read_rows::<R>(&path) {
        Ok(rows) => {
            tracing::debug!(table = name, rows = rows.len(), "loaded reference table");
            Table::new(name, rows)
        }
        Err(err) => {
            tracing::warn!(
                table = name,
                file = %path.display(),
                %err,
                "reference table unavailable; using empty table"
            );
            Table::empty(name)
        }
    }
}
