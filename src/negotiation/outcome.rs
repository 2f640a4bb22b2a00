//! Negotiation result record and savings metrics

use crate::money::signed_diff;
use crate::types::Role;
use serde::{Deserialize, Serialize};

use super::types::{
    DealStatus, NegotiationContext, NegotiationProgress, NegotiationState, PolicyViolation,
    TranscriptEntry,
};

/// Savings figures for a closed negotiation. All zero without a deal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    pub savings: i64,
    pub savings_pct: f64,
    pub below_market_pct: f64,
}

impl DealMetrics {
    pub fn compute(buyer_budget: u64, market_price: u64, final_price: Option<u64>) -> Self {
        let Some(price) = final_price else {
            return Self::default();
        };

        let savings = signed_diff(buyer_budget, price);
        Self {
            savings,
            savings_pct: percent(savings as f64, buyer_budget),
            below_market_pct: percent(market_price as f64 - price as f64, market_price),
        }
    }
}

fn percent(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64 * 100.0
    }
}

/// Outcome of one negotiation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub deal_made: bool,
    pub status: DealStatus,
    pub final_price: Option<u64>,
    /// Which side accepted, when a deal was made
    pub closed_by: Option<Role>,
    pub rounds_used: u32,
    pub savings: i64,
    pub savings_pct: f64,
    pub below_market_pct: f64,
    pub buyer_budget: u64,
    pub market_price: u64,
    pub seller_offers: Vec<u64>,
    pub buyer_offers: Vec<u64>,
    pub transcript: Vec<TranscriptEntry>,
    pub policy_violations: Vec<PolicyViolation>,
    /// How far both sides moved, once each made an offer
    pub progress: Option<NegotiationProgress>,
}

impl NegotiationResult {
    /// Pure function of the final context and terminal state
    pub fn from_closed(
        context: NegotiationContext<'_>,
        state: NegotiationState,
        policy_violations: Vec<PolicyViolation>,
    ) -> Self {
        let (final_price, closed_by) = match state {
            NegotiationState::ClosedDeal { price, accepted_by } => (Some(price), Some(accepted_by)),
            _ => (None, None),
        };

        let market_price = context.product.base_market_price;
        let progress = context.progress();
        let metrics = DealMetrics::compute(context.your_budget, market_price, final_price);

        Self {
            deal_made: final_price.is_some(),
            status: state.deal_status(),
            final_price,
            closed_by,
            rounds_used: context.current_round,
            savings: metrics.savings,
            savings_pct: metrics.savings_pct,
            below_market_pct: metrics.below_market_pct,
            buyer_budget: context.your_budget,
            market_price,
            seller_offers: context.seller_offers,
            buyer_offers: context.your_offers,
            transcript: context.messages,
            policy_violations,
            progress,
        }
    }
}
