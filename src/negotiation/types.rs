//! Negotiation types and state machine

use crate::money::signed_diff;
use crate::types::{Product, Role};
use serde::{Deserialize, Serialize};

/// Status signal returned by a buyer, and the terminal tag of a result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    /// Negotiation continues
    Ongoing,
    /// Current offer is taken as the final price
    Accepted,
    /// Explicit walk-away
    Rejected,
    /// Round budget exhausted with no agreement
    Timeout,
}

/// One line of the negotiation transcript
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub message: String,
}

/// Negotiation state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationState {
    /// Waiting for the seller's opening price
    Opening,
    /// Alternating offers
    Negotiating,
    /// One side accepted the other's price
    ClosedDeal { price: u64, accepted_by: Role },
    /// The buyer walked away
    ClosedRejected,
    /// Round cap reached without agreement
    ClosedTimeout,
}

impl NegotiationState {
    /// Check if negotiation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NegotiationState::ClosedDeal { .. }
                | NegotiationState::ClosedRejected
                | NegotiationState::ClosedTimeout
        )
    }

    /// Check if negotiation is active
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Terminal status tag; `Ongoing` while active
    pub fn deal_status(&self) -> DealStatus {
        match self {
            NegotiationState::Opening | NegotiationState::Negotiating => DealStatus::Ongoing,
            NegotiationState::ClosedDeal { .. } => DealStatus::Accepted,
            NegotiationState::ClosedRejected => DealStatus::Rejected,
            NegotiationState::ClosedTimeout => DealStatus::Timeout,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            NegotiationState::Opening => "Opening",
            NegotiationState::Negotiating => "Negotiating",
            NegotiationState::ClosedDeal { .. } => "ClosedDeal",
            NegotiationState::ClosedRejected => "ClosedRejected",
            NegotiationState::ClosedTimeout => "ClosedTimeout",
        }
    }
}

/// A buyer strategy broke its own budget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyViolation {
    /// Counter-offer above the budget
    OfferAboveBudget { round: u32, offered: u64, budget: u64 },
    /// Accepted a seller price above the budget
    AcceptedAboveBudget { round: u32, price: u64, budget: u64 },
}

/// Mutable per-negotiation state, shown read-only to buyer strategies
#[derive(Clone, Debug)]
pub struct NegotiationContext<'a> {
    pub product: &'a Product,
    /// Ceiling no buyer offer should exceed
    pub your_budget: u64,
    /// 1-based once the first round starts, 0 before
    pub current_round: u32,
    pub seller_offers: Vec<u64>,
    pub your_offers: Vec<u64>,
    pub messages: Vec<TranscriptEntry>,
}

impl<'a> NegotiationContext<'a> {
    pub fn new(product: &'a Product, your_budget: u64) -> Self {
        Self {
            product,
            your_budget,
            current_round: 0,
            seller_offers: Vec::new(),
            your_offers: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn last_seller_offer(&self) -> Option<u64> {
        self.seller_offers.last().copied()
    }

    pub fn last_buyer_offer(&self) -> Option<u64> {
        self.your_offers.last().copied()
    }

    /// Movement and convergence of both sides so far, once each has made an offer
    pub fn progress(&self) -> Option<NegotiationProgress> {
        let (&seller_first, seller_last) = (self.seller_offers.first()?, self.last_seller_offer()?);
        let (&buyer_first, buyer_last) = (self.your_offers.first()?, self.last_buyer_offer()?);

        let current_gap = signed_diff(seller_last, buyer_last);
        let initial_gap = signed_diff(seller_first, buyer_first);

        Some(NegotiationProgress {
            seller_flexibility: ratio(seller_first as f64 - seller_last as f64, seller_first as f64),
            buyer_flexibility: ratio(buyer_last as f64 - buyer_first as f64, buyer_first as f64),
            convergence_rate: if initial_gap > 0 {
                (initial_gap as f64 - current_gap as f64) / initial_gap as f64
            } else {
                0.0
            },
            current_gap,
            market_position: ratio(seller_last as f64, self.product.base_market_price as f64),
            budget_utilization: ratio(buyer_last as f64, self.your_budget as f64),
        })
    }
}

/// Snapshot of how far each side has moved
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationProgress {
    /// Seller's total concession as a fraction of the opening price
    pub seller_flexibility: f64,
    /// Buyer's total increase as a fraction of the opening offer
    pub buyer_flexibility: f64,
    /// Fraction of the initial gap that has been closed
    pub convergence_rate: f64,
    pub current_gap: i64,
    /// Latest seller price relative to market
    pub market_position: f64,
    /// Latest buyer offer relative to budget
    pub budget_utilization: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, QualityGrade};

    fn product() -> Product {
        Product {
            name: "Kesar Mangoes".to_string(),
            category: "Mangoes".to_string(),
            quantity: 150,
            quality_grade: QualityGrade::B,
            origin: "Gujarat".to_string(),
            base_market_price: 150_000,
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn test_state_terminal() {
        assert!(NegotiationState::ClosedTimeout.is_terminal());
        assert!(NegotiationState::ClosedRejected.is_terminal());
        assert!(NegotiationState::ClosedDeal {
            price: 10,
            accepted_by: Role::Seller
        }
        .is_terminal());

        assert!(NegotiationState::Opening.is_active());
        assert!(NegotiationState::Negotiating.is_active());
    }

    #[test]
    fn test_deal_status_mapping() {
        assert_eq!(NegotiationState::Negotiating.deal_status(), DealStatus::Ongoing);
        assert_eq!(NegotiationState::ClosedTimeout.deal_status(), DealStatus::Timeout);
        assert_eq!(NegotiationState::ClosedRejected.deal_status(), DealStatus::Rejected);
    }

    #[test]
    fn test_progress_needs_both_sides() {
        let product = product();
        let mut ctx = NegotiationContext::new(&product, 150_000);
        assert!(ctx.progress().is_none());

        ctx.seller_offers.push(225_000);
        assert!(ctx.progress().is_none());

        ctx.your_offers.push(100_000);
        ctx.seller_offers.push(200_000);
        ctx.your_offers.push(125_000);

        let progress = ctx.progress().unwrap();
        assert_eq!(progress.current_gap, 75_000);
        assert!((progress.convergence_rate - 0.4).abs() < 1e-9);
        assert!((progress.buyer_flexibility - 0.25).abs() < 1e-9);
        assert!((progress.budget_utilization - 125_000.0 / 150_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_zero_opening_offer() {
        let product = product();
        let mut ctx = NegotiationContext::new(&product, 0);
        ctx.seller_offers.push(100);
        ctx.your_offers.push(0);

        let progress = ctx.progress().unwrap();
        assert_eq!(progress.buyer_flexibility, 0.0);
        assert_eq!(progress.budget_utilization, 0.0);
    }

    #[test]
    fn test_violation_serialization() {
        let v = PolicyViolation::OfferAboveBudget {
            round: 3,
            offered: 120,
            budget: 100,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "offer_above_budget");
        assert_eq!(json["offered"], 120);
    }
}
