//! haggle application: runs single scenarios and the batch suite

use crate::agents::{BuyerAgent, BuyerKind, PhraseSource, RandomPhrases, SellerKind};
use crate::config::Settings;
use crate::error::{HaggleError, Result};
use crate::negotiation::{NegotiationEngine, NegotiationResult};
use crate::scenario::{scenario_triplets, Difficulty, ScenarioPreset};
use crate::types::Product;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One (product, preset) negotiation and its outcome
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioRun {
    pub product: String,
    pub preset: ScenarioPreset,
    pub result: NegotiationResult,
}

/// Aggregate over a batch of scenario runs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub buyer: String,
    pub seller: SellerKind,
    pub runs: Vec<ScenarioRun>,
    pub deals_made: usize,
    pub total_savings: i64,
    /// Percentage of runs that closed with a deal
    pub success_rate: f64,
}

impl SuiteSummary {
    pub fn from_runs(buyer: String, seller: SellerKind, runs: Vec<ScenarioRun>) -> Self {
        let deals: Vec<&NegotiationResult> =
            runs.iter().map(|r| &r.result).filter(|r| r.deal_made).collect();
        let deals_made = deals.len();
        let total_savings = deals.iter().map(|r| r.savings).sum();
        let success_rate = if runs.is_empty() {
            0.0
        } else {
            deals_made as f64 / runs.len() as f64 * 100.0
        };

        Self {
            buyer,
            seller,
            runs,
            deals_made,
            total_savings,
            success_rate,
        }
    }
}

/// Main haggle application
#[derive(Clone)]
pub struct HaggleApp {
    engine: Arc<NegotiationEngine>,
    phrases: Option<Arc<dyn PhraseSource>>,
}

impl HaggleApp {
    /// Create an application with its own seeded phrase source per scenario
    pub fn new(settings: Settings) -> Self {
        Self {
            engine: Arc::new(NegotiationEngine::new(settings)),
            phrases: None,
        }
    }

    /// Share one phrase source across every buyer this app builds
    pub fn with_phrases(mut self, phrases: Arc<dyn PhraseSource>) -> Self {
        self.phrases = Some(phrases);
        self
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    /// Build a buyer whose message picks are seeded for scenario `index`
    pub fn buyer(&self, kind: BuyerKind, index: u64) -> Arc<dyn BuyerAgent> {
        let phrases = match &self.phrases {
            Some(phrases) => phrases.clone(),
            None => {
                let seed = self.settings().random_seed.map(|s| s.wrapping_add(index));
                Arc::new(RandomPhrases::from_seed(seed))
            }
        };
        kind.build(phrases, &self.settings().currency)
    }

    /// Run one product at one difficulty
    pub fn run_scenario(
        &self,
        buyer: BuyerKind,
        seller: SellerKind,
        product: &Product,
        difficulty: Difficulty,
    ) -> Result<ScenarioRun> {
        let preset = scenario_triplets(product.base_market_price).get(difficulty);
        let buyer = self.buyer(buyer, 0);
        run_preset(&self.engine, buyer.as_ref(), seller, product, preset)
    }

    /// Run every product against every preset, one blocking task per scenario
    pub async fn run_suite(
        &self,
        products: &[Product],
        buyer: BuyerKind,
        seller: SellerKind,
    ) -> Result<SuiteSummary> {
        let buyer_name = self.buyer(buyer, 0).name().to_string();
        tracing::info!(
            "Running suite: {} products x {} presets, buyer {}, seller {:?}",
            products.len(),
            Difficulty::ALL.len(),
            buyer_name,
            seller
        );

        let mut tasks = Vec::new();
        for product in products {
            for preset in scenario_triplets(product.base_market_price).iter() {
                let engine = self.engine.clone();
                let agent = self.buyer(buyer, tasks.len() as u64);
                let product = product.clone();
                tasks.push(tokio::task::spawn_blocking(move || {
                    run_preset(&engine, agent.as_ref(), seller, &product, preset)
                }));
            }
        }

        let mut runs = Vec::with_capacity(tasks.len());
        for joined in futures::future::join_all(tasks).await {
            let run = joined.map_err(|e| HaggleError::ScenarioTask(e.to_string()))??;
            runs.push(run);
        }

        let summary = SuiteSummary::from_runs(buyer_name, seller, runs);
        tracing::info!(
            "Suite finished: {}/{} deals, total savings {}",
            summary.deals_made,
            summary.runs.len(),
            summary.total_savings
        );
        Ok(summary)
    }
}

fn run_preset(
    engine: &NegotiationEngine,
    buyer: &dyn BuyerAgent,
    seller: SellerKind,
    product: &Product,
    preset: ScenarioPreset,
) -> Result<ScenarioRun> {
    let seller = seller.build(preset.seller_min, &engine.settings().currency);
    let result = engine.negotiate(buyer, seller.as_ref(), product, preset.buyer_budget)?;

    Ok(ScenarioRun {
        product: product.name.clone(),
        preset,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::FixedPhrase;
    use crate::catalog::sample_products;

    fn app() -> HaggleApp {
        HaggleApp::new(Settings::default()).with_phrases(Arc::new(FixedPhrase(0)))
    }

    #[test]
    fn test_run_scenario() {
        let products = sample_products();
        let run = app()
            .run_scenario(BuyerKind::Strategic, SellerKind::Standard, &products[0], Difficulty::Easy)
            .unwrap();

        assert_eq!(run.product, "Alphonso Mangoes");
        assert_eq!(run.preset.buyer_budget, 216_000);
        assert_eq!(run.result.final_price, Some(159_355));
    }

    #[tokio::test]
    async fn test_run_suite_covers_every_preset() {
        let products = sample_products();
        let summary = app()
            .run_suite(&products, BuyerKind::Strategic, SellerKind::Standard)
            .await
            .unwrap();

        assert_eq!(summary.runs.len(), 6);
        assert_eq!(summary.buyer, "StrategicAnalyst");
        assert_eq!(summary.runs[0].product, "Alphonso Mangoes");
        assert_eq!(summary.runs[0].preset.difficulty, Difficulty::Easy);
        assert_eq!(summary.runs[5].preset.difficulty, Difficulty::Hard);

        let deals = summary.runs.iter().filter(|r| r.result.deal_made).count();
        assert_eq!(summary.deals_made, deals);
        assert!((summary.success_rate - deals as f64 / 6.0 * 100.0).abs() < 1e-9);

        let savings: i64 = summary
            .runs
            .iter()
            .filter(|r| r.result.deal_made)
            .map(|r| r.result.savings)
            .sum();
        assert_eq!(summary.total_savings, savings);
    }

    #[test]
    fn test_suite_matches_sequential_runs() {
        let products = sample_products();
        let app = app();

        let summary = tokio_test::block_on(app.run_suite(&products, BuyerKind::Cautious, SellerKind::Friendly))
            .unwrap();

        for run in &summary.runs {
            let product = products.iter().find(|p| p.name == run.product).unwrap();
            let sequential = app
                .run_scenario(BuyerKind::Cautious, SellerKind::Friendly, product, run.preset.difficulty)
                .unwrap();
            assert_eq!(sequential.result, run.result);
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = SuiteSummary::from_runs("nobody".to_string(), SellerKind::Tough, Vec::new());
        assert_eq!(summary.deals_made, 0);
        assert_eq!(summary.success_rate, 0.0);
    }
}
