//! Layered engine configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `unicorn.toml` in the working directory (or an explicit file)
//! 3. Environment variables prefixed `UNICORN_`, `__` separating sections
//!
//! `UNICORN_SENTIMENT__FINANCIAL__ENDPOINT` maps to
//! `sentiment.financial.endpoint`, `UNICORN_REFERENCE_DIR` to `reference_dir`.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use unicorn_core::ScoringPolicy;
use unicorn_sentiment::SentimentConfig;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "unicorn.toml";
pub const ENV_PREFIX: &str = "UNICORN_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the nine reference tables.
    pub reference_dir: PathBuf,
    pub sentiment: SentimentConfig,
    pub scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("resources"),
            sentiment: SentimentConfig::default(),
            scoring: ScoringPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults, then `unicorn.toml` if present, then `UNICORN_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment(Path::new(CONFIG_FILE)))
    }

    /// Same layering with an explicit TOML file in place of `unicorn.toml`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::figment(path.as_ref()))
    }

    pub fn figment(toml_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if toml_path.exists() {
            figment = figment.merge(Toml::file(toml_path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.scoring.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use unicorn_sentiment::{FinancialProvider, GeneralProvider};

    #[test]
    fn defaults_without_files_or_env() {
        Jail::expect_with(|_jail| {
            let config = EngineConfig::load().expect("defaults load");
            assert_eq!(config, EngineConfig::default());
            assert_eq!(config.reference_dir, PathBuf::from("resources"));
            assert_eq!(config.sentiment.financial.endpoint, None);
            assert_eq!(config.sentiment.financial.timeout_secs, 10);
            assert_eq!(config.sentiment.financial.max_input_chars, 512);
            assert_eq!(config.sentiment.general.lexicon_path, None);
            Ok(())
        });
    }

    #[test]
    fn toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
reference_dir = "tables"

[sentiment.financial]
provider = "disabled"
endpoint = "http://toml:8080"

[sentiment.general]
lexicon_path = "lexicon.txt"

[scoring.traction]
score_revenue = true
"#,
            )?;
            jail.set_env("UNICORN_SENTIMENT__FINANCIAL__ENDPOINT", "http://env:9090");
            jail.set_env("UNICORN_SENTIMENT__FINANCIAL__TIMEOUT_SECS", "3");

            let config = EngineConfig::load().expect("config loads");
            assert_eq!(config.reference_dir, PathBuf::from("tables"));
            assert_eq!(config.sentiment.financial.provider, FinancialProvider::Disabled);
            assert_eq!(
                config.sentiment.financial.endpoint.as_deref(),
                Some("http://env:9090")
            );
            assert_eq!(config.sentiment.financial.timeout_secs, 3);
            assert_eq!(config.sentiment.general.provider, GeneralProvider::Lexicon);
            assert_eq!(
                config.sentiment.general.lexicon_path,
                Some(PathBuf::from("lexicon.txt"))
            );
            assert!(config.scoring.traction.score_revenue);
            assert!(!config.scoring.market.score_sub_markets);
            Ok(())
        });
    }

    #[test]
    fn explicit_file_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "reference_dir = \"elsewhere\"\n")?;
            let config = EngineConfig::load_from("custom.toml").expect("config loads");
            assert_eq!(config.reference_dir, PathBuf::from("elsewhere"));
            Ok(())
        });
    }

    #[test]
    fn invalid_policy_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("UNICORN_SCORING__WEIGHTS__TEAM", "0.9");
            let err = EngineConfig::load().expect_err("weights no longer sum to 1");
            assert!(matches!(err, ConfigError::Policy(_)));
            Ok(())
        });
    }

    #[test]
    fn malformed_value_is_a_figment_error() {
        Jail::expect_with(|jail| {
            jail.set_env("UNICORN_SENTIMENT__FINANCIAL__TIMEOUT_SECS", "soon");
            let err = EngineConfig::load().expect_err("timeout must be numeric");
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }
}
