//! CLI command definitions

use crate::agents::{BuyerKind, SellerKind};
use crate::config::{BudgetPolicy, Settings};
use crate::error::Result;
use crate::scenario::Difficulty;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "haggle")]
#[command(about = "haggle - turn-based buyer/seller price negotiation simulator", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: SettingsOverrides,

    /// Emit JSON instead of the text report
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that take precedence over MAX_ROUNDS / RANDOM_SEED / CURRENCY / BUDGET_POLICY
#[derive(Args, Debug, Default)]
pub struct SettingsOverrides {
    /// Round cap per negotiation
    #[arg(long, global = true)]
    pub max_rounds: Option<u32>,

    /// Seed for message selection
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Currency symbol for display
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// What to do with a buyer offer above its budget
    #[arg(long, global = true, value_enum)]
    pub budget_policy: Option<BudgetPolicy>,
}

impl SettingsOverrides {
    pub fn apply(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(max_rounds) = self.max_rounds {
            settings.max_rounds = max_rounds;
        }
        if let Some(seed) = self.seed {
            settings.random_seed = Some(seed);
        }
        if let Some(currency) = &self.currency {
            settings.currency = currency.clone();
        }
        if let Some(budget_policy) = self.budget_policy {
            settings.budget_policy = budget_policy;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every product against the easy, medium and hard presets
    Suite {
        /// Buyer strategy
        #[arg(short, long, value_enum, default_value_t = BuyerKind::Strategic)]
        buyer: BuyerKind,

        /// Seller strategy
        #[arg(short, long, value_enum, default_value_t = SellerKind::Standard)]
        seller: SellerKind,

        /// JSON product catalogue (defaults to the built-in mangoes)
        #[arg(short, long)]
        products: Option<PathBuf>,
    },

    /// Run a single negotiation
    Run {
        /// Product name or name prefix
        product: String,

        /// Difficulty preset
        #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,

        /// Buyer strategy
        #[arg(short, long, value_enum, default_value_t = BuyerKind::Strategic)]
        buyer: BuyerKind,

        /// Seller strategy
        #[arg(short, long, value_enum, default_value_t = SellerKind::Standard)]
        seller: SellerKind,

        /// JSON product catalogue (defaults to the built-in mangoes)
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Print the full conversation
        #[arg(short, long)]
        transcript: bool,
    },

    /// Show the difficulty presets for a market price
    Scenarios {
        /// Market price to derive presets from
        market_price: u64,
    },

    /// Show a buyer's personality and prompt
    Persona {
        #[arg(short, long, value_enum, default_value_t = BuyerKind::Strategic)]
        buyer: BuyerKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suite_defaults() {
        let cli = Cli::try_parse_from(["haggle", "suite"]).unwrap();
        match cli.command {
            Commands::Suite { buyer, seller, products } => {
                assert_eq!(buyer, BuyerKind::Strategic);
                assert_eq!(seller, SellerKind::Standard);
                assert!(products.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_with_globals() {
        let cli = Cli::try_parse_from([
            "haggle", "run", "kesar", "-d", "hard", "--seller", "tough", "--max-rounds", "6", "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.overrides.max_rounds, Some(6));
        assert!(matches!(
            cli.command,
            Commands::Run {
                difficulty: Difficulty::Hard,
                seller: SellerKind::Tough,
                ..
            }
        ));
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = SettingsOverrides {
            max_rounds: Some(4),
            seed: Some(9),
            currency: Some("$".to_string()),
            budget_policy: Some(BudgetPolicy::Record),
        };

        let settings = overrides.apply(Settings::default()).unwrap();
        assert_eq!(settings.max_rounds, 4);
        assert_eq!(settings.random_seed, Some(9));
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.budget_policy, BudgetPolicy::Record);
    }

    #[test]
    fn test_parse_budget_policy_flag() {
        let cli = Cli::try_parse_from(["haggle", "--budget-policy", "record", "suite"]).unwrap();
        assert_eq!(cli.overrides.budget_policy, Some(BudgetPolicy::Record));

        let cli = Cli::try_parse_from(["haggle", "suite"]).unwrap();
        let settings = cli.overrides.apply(Settings::default()).unwrap();
        assert_eq!(settings.budget_policy, BudgetPolicy::Clamp);

        assert!(Cli::try_parse_from(["haggle", "suite", "--budget-policy", "ignore"]).is_err());
    }

    #[test]
    fn test_zero_rounds_override_rejected() {
        let overrides = SettingsOverrides {
            max_rounds: Some(0),
            ..SettingsOverrides::default()
        };
        assert!(overrides.apply(Settings::default()).is_err());
    }
}
