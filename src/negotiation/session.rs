//! Negotiation session: the context plus its state machine

use crate::error::{HaggleError, Result};
use crate::types::{Product, Role};

use super::types::{NegotiationContext, NegotiationState, PolicyViolation, TranscriptEntry};

/// A single buyer-versus-seller negotiation in progress
#[derive(Clone, Debug)]
pub struct NegotiationSession<'a> {
    context: NegotiationContext<'a>,
    state: NegotiationState,
    violations: Vec<PolicyViolation>,
}

impl<'a> NegotiationSession<'a> {
    /// Create a session waiting for the seller's opening price
    pub fn new(product: &'a Product, buyer_budget: u64) -> Self {
        Self {
            context: NegotiationContext::new(product, buyer_budget),
            state: NegotiationState::Opening,
            violations: Vec::new(),
        }
    }

    /// Read-only view handed to buyer strategies
    pub fn context(&self) -> &NegotiationContext<'a> {
        &self.context
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn violations(&self) -> &[PolicyViolation] {
        &self.violations
    }

    /// Move to `next`, rejecting transitions the protocol does not allow
    pub fn set_state(&mut self, next: NegotiationState) -> Result<()> {
        let allowed = match (&self.state, &next) {
            (NegotiationState::Opening, NegotiationState::Negotiating) => true,
            (NegotiationState::Negotiating, next) => next.is_terminal(),
            _ => false,
        };

        if !allowed {
            return Err(HaggleError::InvalidStateTransition {
                from: self.state.label().to_string(),
                to: next.label().to_string(),
            });
        }

        self.state = next;
        Ok(())
    }

    /// Record the seller's opening price and start negotiating
    pub fn open(&mut self, price: u64, message: String) -> Result<()> {
        self.set_state(NegotiationState::Negotiating)?;
        self.context.seller_offers.push(price);
        self.push_message(Role::Seller, message);
        Ok(())
    }

    /// Set the 1-based round counter
    pub fn begin_round(&mut self, round: u32) -> Result<()> {
        self.ensure_negotiating("Negotiating")?;
        self.context.current_round = round;
        Ok(())
    }

    pub fn record_buyer_offer(&mut self, price: u64, message: String) -> Result<()> {
        self.ensure_negotiating("Negotiating")?;
        self.context.your_offers.push(price);
        self.push_message(Role::Buyer, message);
        Ok(())
    }

    pub fn record_seller_offer(&mut self, price: u64, message: String) -> Result<()> {
        self.ensure_negotiating("Negotiating")?;
        self.context.seller_offers.push(price);
        self.push_message(Role::Seller, message);
        Ok(())
    }

    /// Seller accepted: its message joins the transcript but no new offer is recorded
    pub fn record_seller_acceptance(&mut self, price: u64, message: String) -> Result<()> {
        self.ensure_negotiating("ClosedDeal")?;
        self.push_message(Role::Seller, message);
        self.set_state(NegotiationState::ClosedDeal {
            price,
            accepted_by: Role::Seller,
        })
    }

    /// Buyer accepted the seller's most recent offer
    pub fn record_buyer_acceptance(&mut self, price: u64) -> Result<()> {
        self.set_state(NegotiationState::ClosedDeal {
            price,
            accepted_by: Role::Buyer,
        })
    }

    pub fn reject(&mut self) -> Result<()> {
        self.set_state(NegotiationState::ClosedRejected)
    }

    pub fn time_out(&mut self) -> Result<()> {
        self.set_state(NegotiationState::ClosedTimeout)
    }

    pub fn flag(&mut self, violation: PolicyViolation) {
        self.violations.push(violation);
    }

    /// Consume the session once it has closed
    pub fn into_parts(self) -> (NegotiationContext<'a>, NegotiationState, Vec<PolicyViolation>) {
        (self.context, self.state, self.violations)
    }

    fn ensure_negotiating(&self, to: &str) -> Result<()> {
        if self.state != NegotiationState::Negotiating {
            return Err(HaggleError::InvalidStateTransition {
                from: self.state.label().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn push_message(&mut self, role: Role, message: String) {
        self.context.messages.push(TranscriptEntry { role, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, QualityGrade};

    fn product() -> Product {
        Product {
            name: "Alphonso Mangoes".to_string(),
            category: "Mangoes".to_string(),
            quantity: 100,
            quality_grade: QualityGrade::A,
            origin: "Ratnagiri".to_string(),
            base_market_price: 180_000,
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn test_session_creation() {
        let product = product();
        let session = NegotiationSession::new(&product, 216_000);

        assert_eq!(session.state(), &NegotiationState::Opening);
        assert_eq!(session.context().current_round, 0);
        assert_eq!(session.context().your_budget, 216_000);
        assert!(session.context().messages.is_empty());
    }

    #[test]
    fn test_opening_records_seller_offer() {
        let product = product();
        let mut session = NegotiationSession::new(&product, 216_000);

        session.open(270_000, "Asking 270000".to_string()).unwrap();

        assert_eq!(session.state(), &NegotiationState::Negotiating);
        assert_eq!(session.context().seller_offers, vec![270_000]);
        assert_eq!(session.context().messages[0].role, Role::Seller);
    }

    #[test]
    fn test_cannot_record_before_opening() {
        let product = product();
        let mut session = NegotiationSession::new(&product, 216_000);

        assert!(session.begin_round(1).is_err());
        assert!(session.record_buyer_offer(100, "hi".to_string()).is_err());
        assert!(session.time_out().is_err());
    }

    #[test]
    fn test_seller_acceptance_keeps_offer_history() {
        let product = product();
        let mut session = NegotiationSession::new(&product, 216_000);

        session.open(270_000, "open".to_string()).unwrap();
        session.begin_round(1).unwrap();
        session.record_buyer_offer(160_000, "offer".to_string()).unwrap();
        session
            .record_seller_acceptance(160_000, "deal".to_string())
            .unwrap();

        assert_eq!(
            session.state(),
            &NegotiationState::ClosedDeal {
                price: 160_000,
                accepted_by: Role::Seller
            }
        );
        assert_eq!(session.context().seller_offers.len(), 1);
        assert_eq!(session.context().messages.len(), 3);
    }

    #[test]
    fn test_cannot_transition_after_close() {
        let product = product();
        let mut session = NegotiationSession::new(&product, 216_000);

        session.open(270_000, "open".to_string()).unwrap();
        session.time_out().unwrap();

        assert!(session.reject().is_err());
        assert!(session.record_seller_offer(1, "late".to_string()).is_err());
        assert!(matches!(
            session.set_state(NegotiationState::Negotiating),
            Err(HaggleError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_flag_violation() {
        let product = product();
        let mut session = NegotiationSession::new(&product, 100);

        session.flag(PolicyViolation::OfferAboveBudget {
            round: 2,
            offered: 150,
            budget: 100,
        });

        assert_eq!(session.violations().len(), 1);
    }
}
