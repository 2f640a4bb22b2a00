//! Difficulty presets derived from a market price

use crate::money::per_mille;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named difficulty preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// (buyer budget, seller minimum) as per-mille of market price
    fn multipliers(self) -> (u64, u64) {
        match self {
            Difficulty::Easy => (1_200, 800),
            Difficulty::Medium => (1_000, 850),
            Difficulty::Hard => (900, 820),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Budget and seller floor for one difficulty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub difficulty: Difficulty,
    pub buyer_budget: u64,
    pub seller_min: u64,
}

impl ScenarioPreset {
    pub fn new(difficulty: Difficulty, market_price: u64) -> Self {
        let (budget, floor) = difficulty.multipliers();
        Self {
            difficulty,
            buyer_budget: per_mille(market_price, budget),
            seller_min: per_mille(market_price, floor),
        }
    }
}

/// The three presets for one market price
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTriplet {
    pub easy: ScenarioPreset,
    pub medium: ScenarioPreset,
    pub hard: ScenarioPreset,
}

impl ScenarioTriplet {
    pub fn get(&self, difficulty: Difficulty) -> ScenarioPreset {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Presets in easy, medium, hard order
    pub fn iter(&self) -> impl Iterator<Item = ScenarioPreset> + '_ {
        Difficulty::ALL.into_iter().map(move |d| self.get(d))
    }
}

/// Derive the easy/medium/hard presets for `market_price`
pub fn scenario_triplets(market_price: u64) -> ScenarioTriplet {
    ScenarioTriplet {
        easy: ScenarioPreset::new(Difficulty::Easy, market_price),
        medium: ScenarioPreset::new(Difficulty::Medium, market_price),
        hard: ScenarioPreset::new(Difficulty::Hard, market_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphonso_triplets() {
        let t = scenario_triplets(180_000);

        assert_eq!(t.easy.buyer_budget, 216_000);
        assert_eq!(t.easy.seller_min, 144_000);
        assert_eq!(t.medium.buyer_budget, 180_000);
        assert_eq!(t.medium.seller_min, 153_000);
        assert_eq!(t.hard.buyer_budget, 162_000);
        assert_eq!(t.hard.seller_min, 147_600);
    }

    #[test]
    fn test_triplets_are_pure() {
        assert_eq!(scenario_triplets(150_000), scenario_triplets(150_000));
        assert_eq!(scenario_triplets(180_000), scenario_triplets(180_000));
    }

    #[test]
    fn test_truncation() {
        let t = scenario_triplets(999);
        assert_eq!(t.easy.buyer_budget, 1_198);
        assert_eq!(t.hard.seller_min, 819);
    }

    #[test]
    fn test_iter_order() {
        let order: Vec<Difficulty> = scenario_triplets(1_000).iter().map(|p| p.difficulty).collect();
        assert_eq!(order, Difficulty::ALL.to_vec());
    }
}
