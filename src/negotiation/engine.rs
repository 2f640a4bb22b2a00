//! Negotiation engine drives one buyer against one seller

use crate::agents::{BuyerAgent, BuyerReply, Offer, SellerAgent, StandardSeller};
use crate::config::{BudgetPolicy, Settings};
use crate::error::Result;
use crate::types::Product;

use super::outcome::NegotiationResult;
use super::session::NegotiationSession;
use super::types::{DealStatus, PolicyViolation};

/// Round driver. Holds only immutable settings, so one engine can serve
/// any number of concurrent negotiations.
#[derive(Clone, Debug, Default)]
pub struct NegotiationEngine {
    settings: Settings,
}

impl NegotiationEngine {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run `buyer` against the standard seller with floor `seller_min`
    pub fn run_negotiation(
        &self,
        buyer: &dyn BuyerAgent,
        product: &Product,
        buyer_budget: u64,
        seller_min: u64,
    ) -> Result<NegotiationResult> {
        let seller = StandardSeller::new(seller_min).with_currency(self.settings.currency.as_str());
        self.negotiate(buyer, &seller, product, buyer_budget)
    }

    /// Run one negotiation to a terminal state.
    ///
    /// The seller opens, then each round the buyer moves before the seller.
    /// A buyer acceptance closes at the seller's last price; a seller
    /// acceptance closes at the buyer's offer.
    pub fn negotiate(
        &self,
        buyer: &dyn BuyerAgent,
        seller: &dyn SellerAgent,
        product: &Product,
        buyer_budget: u64,
    ) -> Result<NegotiationResult> {
        let mut session = NegotiationSession::new(product, buyer_budget);

        let mut last_seller = seller.open(product);
        tracing::info!(
            "Negotiating {} (market {}, budget {}): seller opens at {}",
            product.name,
            product.base_market_price,
            buyer_budget,
            last_seller.price
        );
        session.open(last_seller.price, last_seller.message.clone())?;

        for round in 1..=self.settings.max_rounds {
            session.begin_round(round)?;

            let reply = if round == 1 {
                let Offer { price, message } = buyer.open(session.context());
                BuyerReply::counter(price, message)
            } else {
                buyer.respond(session.context(), last_seller.price, &last_seller.message)
            };

            // An accepting or departing buyer's price is not an offer
            let offer = match reply.status {
                DealStatus::Ongoing | DealStatus::Timeout => {
                    self.police_budget(&mut session, round, reply.price)
                }
                DealStatus::Accepted | DealStatus::Rejected => reply.price,
            };
            tracing::debug!("Round {}: buyer {:?} at {}", round, reply.status, offer);
            session.record_buyer_offer(offer, reply.message)?;

            match reply.status {
                DealStatus::Accepted => {
                    if last_seller.price > buyer_budget {
                        self.flag(
                            &mut session,
                            PolicyViolation::AcceptedAboveBudget {
                                round,
                                price: last_seller.price,
                                budget: buyer_budget,
                            },
                        );
                    }
                    session.record_buyer_acceptance(last_seller.price)?;
                    break;
                }
                DealStatus::Rejected => {
                    session.reject()?;
                    break;
                }
                DealStatus::Timeout => {
                    tracing::debug!("Round {}: buyer signalled timeout, continuing", round);
                }
                DealStatus::Ongoing => {}
            }

            // Sellers see a zero-based round index
            let answer = seller.respond(offer, round - 1);
            if answer.accepted {
                session.record_seller_acceptance(offer, answer.message)?;
                break;
            }

            tracing::debug!("Round {}: seller counters at {}", round, answer.price);
            session.record_seller_offer(answer.price, answer.message.clone())?;
            last_seller = Offer::new(answer.price, answer.message);
        }

        if session.state().is_active() {
            session.time_out()?;
        }

        let (context, state, violations) = session.into_parts();
        let result = NegotiationResult::from_closed(context, state, violations);

        match result.final_price {
            Some(price) => tracing::info!(
                "{}: deal at {} in {} rounds ({:?} accepted)",
                product.name,
                price,
                result.rounds_used,
                result.closed_by
            ),
            None => tracing::info!(
                "{}: no deal ({:?}) after {} rounds",
                product.name,
                result.status,
                result.rounds_used
            ),
        }

        Ok(result)
    }

    /// Apply the budget policy to a buyer offer
    fn police_budget(&self, session: &mut NegotiationSession<'_>, round: u32, offered: u64) -> u64 {
        let budget = session.context().your_budget;
        if offered <= budget {
            return offered;
        }

        self.flag(
            session,
            PolicyViolation::OfferAboveBudget {
                round,
                offered,
                budget,
            },
        );

        match self.settings.budget_policy {
            BudgetPolicy::Clamp => budget,
            BudgetPolicy::Record => offered,
        }
    }

    fn flag(&self, session: &mut NegotiationSession<'_>, violation: PolicyViolation) {
        tracing::warn!("Buyer policy violation: {:?}", violation);
        session.flag(violation);
    }
}

/// Run `buyer` against the standard seller with default settings
pub fn run_negotiation(
    buyer: &dyn BuyerAgent,
    product: &Product,
    buyer_budget: u64,
    seller_min: u64,
) -> Result<NegotiationResult> {
    NegotiationEngine::default().run_negotiation(buyer, product, buyer_budget, seller_min)
}
