//! Process-wide settings, read once at startup

use crate::error::{HaggleError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_MAX_ROUNDS: u32 = 10;
pub const DEFAULT_CURRENCY: &str = "₹";

/// What the driver does with a buyer offer above the buyer's budget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPolicy {
    /// Clamp the offer to the budget and flag the violation
    #[default]
    Clamp,
    /// Pass the offer through unchanged and flag the violation
    Record,
}

impl FromStr for BudgetPolicy {
    type Err = HaggleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(BudgetPolicy::Clamp),
            "record" => Ok(BudgetPolicy::Record),
            other => Err(HaggleError::InvalidConfig {
                key: "BUDGET_POLICY".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Simulator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Round cap for every negotiation
    pub max_rounds: u32,
    /// Seed for flavor-text selection; never used for pricing
    pub random_seed: Option<u64>,
    /// Display-only currency symbol
    pub currency: String,
    pub budget_policy: BudgetPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            random_seed: None,
            currency: DEFAULT_CURRENCY.to_string(),
            budget_policy: BudgetPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment, after merging a `.env`
    /// file from the working directory when one exists.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment overrides from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(HaggleError::Configuration(e.to_string())),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut settings = Settings::default();

        if let Some(raw) = get("MAX_ROUNDS") {
            settings.max_rounds = parse_value("MAX_ROUNDS", &raw)?;
        }
        if let Some(raw) = get("RANDOM_SEED") {
            settings.random_seed = Some(parse_seed(&raw)?);
        }
        if let Some(raw) = get("CURRENCY") {
            settings.currency = raw;
        }
        if let Some(raw) = get("BUDGET_POLICY") {
            settings.budget_policy = raw.parse()?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the driver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(HaggleError::InvalidConfig {
                key: "MAX_ROUNDS".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| HaggleError::InvalidConfig {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Seeds accept the full `i64` range too; negatives wrap into `u64`
fn parse_seed(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .or_else(|_| trimmed.parse::<i64>().map(|seed| seed as u64))
        .map_err(|_| HaggleError::InvalidConfig {
            key: "RANDOM_SEED".to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_rounds, 10);
        assert_eq!(settings.currency, "₹");
        assert_eq!(settings.random_seed, None);
        assert_eq!(settings.budget_policy, BudgetPolicy::Clamp);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("MAX_ROUNDS", "6"),
            ("RANDOM_SEED", "42"),
            ("CURRENCY", "$"),
            ("BUDGET_POLICY", "Record"),
        ]))
        .unwrap();

        assert_eq!(settings.max_rounds, 6);
        assert_eq!(settings.random_seed, Some(42));
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.budget_policy, BudgetPolicy::Record);
    }

    #[test]
    fn test_empty_seed_is_unset() {
        let settings = Settings::from_lookup(lookup(&[("RANDOM_SEED", "")])).unwrap();
        assert_eq!(settings.random_seed, None);
    }

    #[test]
    fn test_malformed_values_fail_fast() {
        let err = Settings::from_lookup(lookup(&[("MAX_ROUNDS", "ten")])).unwrap_err();
        assert!(matches!(err, HaggleError::InvalidConfig { ref key, .. } if key == "MAX_ROUNDS"));

        let err = Settings::from_lookup(lookup(&[("RANDOM_SEED", "seven")])).unwrap_err();
        assert!(matches!(err, HaggleError::InvalidConfig { ref key, .. } if key == "RANDOM_SEED"));

        assert!(Settings::from_lookup(lookup(&[("BUDGET_POLICY", "ignore")])).is_err());
    }

    #[test]
    fn test_negative_seed_wraps() {
        let settings = Settings::from_lookup(lookup(&[("RANDOM_SEED", "-1")])).unwrap();
        assert_eq!(settings.random_seed, Some(u64::MAX));

        let settings = Settings::from_lookup(lookup(&[("RANDOM_SEED", " -42 ")])).unwrap();
        assert_eq!(settings.random_seed, Some((-42i64) as u64));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        assert!(Settings::from_lookup(lookup(&[("MAX_ROUNDS", "0")])).is_err());
    }
}
