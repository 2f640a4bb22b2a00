//! Reference buyers

use crate::config::DEFAULT_CURRENCY;
use crate::money::{money, per_mille};
use crate::negotiation::NegotiationContext;
use crate::types::{Attributes, Product, QualityGrade};
use std::sync::Arc;

use super::phrases::{choose, PhraseSource};
use super::{BuyerAgent, BuyerReply, Offer, Personality};

const PREMIUM_ORIGINS: [&str; 3] = ["Ratnagiri", "Alphonso", "Devgad"];

/// Stage of the negotiation, keyed off the 1-based round counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Middle,
    Closing,
    Final,
}

impl Phase {
    pub fn of_round(round: u32) -> Self {
        match round {
            0..=2 => Phase::Opening,
            3..=5 => Phase::Middle,
            6..=8 => Phase::Closing,
            _ => Phase::Final,
        }
    }

    /// Highest seller price, as per-mille of market, worth accepting
    fn acceptance_threshold(self) -> u64 {
        match self {
            Phase::Opening => 750,
            Phase::Middle => 850,
            Phase::Closing => 950,
            Phase::Final => 1_050,
        }
    }

    /// Share of the gap to the seller's price closed per counter
    fn convergence_rate(self) -> i64 {
        match self {
            Phase::Opening => 150,
            Phase::Middle => 250,
            Phase::Closing => 400,
            Phase::Final => 600,
        }
    }
}

fn quality_multiplier(grade: QualityGrade) -> u64 {
    match grade {
        QualityGrade::Export => 1_000,
        QualityGrade::A => 800,
        QualityGrade::B => 600,
    }
}

fn origin_premium(origin: &str) -> u64 {
    if PREMIUM_ORIGINS.iter().any(|premium| origin.contains(premium)) {
        1_100
    } else {
        950
    }
}

/// Analytical, diplomatic buyer that anchors on quality and origin and
/// concedes faster as the round cap approaches
pub struct StrategicBuyer {
    name: String,
    personality: Personality,
    phrases: Arc<dyn PhraseSource>,
    currency: String,
}

impl StrategicBuyer {
    pub fn new(name: impl Into<String>, phrases: Arc<dyn PhraseSource>) -> Self {
        Self {
            name: name.into(),
            personality: Personality {
                personality_type: "strategic_analytical".to_string(),
                traits: to_strings(&["data-driven", "patient", "diplomatic", "value-focused", "strategic"]),
                negotiation_style: "Uses market analysis and relationship building to create \
                    win-win scenarios while maximizing value. Patient but decisive when needed."
                    .to_string(),
                catchphrases: to_strings(&[
                    "Based on my market analysis...",
                    "Let's find a mutually beneficial arrangement",
                    "The numbers suggest...",
                    "I value quality partnerships",
                ]),
                extra: Attributes::new(),
            },
            phrases,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Quality, origin and bulk-adjusted estimate of what the lot is worth
    pub fn fair_price(product: &Product) -> u64 {
        let quantity_discount = match product.quantity {
            q if q >= 500 => 900,
            q if q >= 200 => 950,
            _ => 1_000,
        };

        let price = per_mille(product.base_market_price, quality_multiplier(product.quality_grade));
        let price = per_mille(price, origin_premium(&product.origin));
        per_mille(price, quantity_discount)
    }

    fn should_accept(&self, seller_price: u64, ctx: &NegotiationContext<'_>, phase: Phase) -> bool {
        if seller_price > ctx.your_budget {
            return false;
        }
        seller_price <= per_mille(ctx.product.base_market_price, phase.acceptance_threshold())
    }

    fn counter_offer(&self, seller_price: u64, ctx: &NegotiationContext<'_>, phase: Phase) -> u64 {
        let last = i128::from(ctx.last_buyer_offer().unwrap_or(0));
        let gap = i128::from(seller_price) - last;
        let mut counter = last + gap * i128::from(phase.convergence_rate()) / 1_000;

        // Far above market: hold back
        if seller_price > per_mille(ctx.product.base_market_price, 1_200) {
            counter = counter * 900 / 1_000;
        }

        let min_increment = (last * 5 / 100).max(5_000);
        counter = counter.max(last + min_increment);

        // Bounded by the budget, so the narrowing is lossless
        counter.clamp(0, i128::from(ctx.your_budget)) as u64
    }

    fn counter_message(&self, counter: u64, ctx: &NegotiationContext<'_>, phase: Phase) -> String {
        let price = money(counter, &self.currency);
        match phase {
            Phase::Opening => format!(
                "I appreciate the quality, but based on my market analysis, {} better reflects \
                 current market conditions for {} grade products.",
                price, ctx.product.quality_grade
            ),
            Phase::Middle => format!(
                "Let's find a mutually beneficial arrangement. At {}, we're moving toward a fair \
                 deal that works for both parties.",
                price
            ),
            Phase::Closing => format!(
                "The numbers suggest {} represents excellent value for this quality. I value \
                 quality partnerships and believe this price point achieves that.",
                price
            ),
            Phase::Final => format!(
                "Based on my market analysis and our discussion, {} is my best offer. My fair \
                 value estimate for this lot is {}, so I'm confident this reflects the true \
                 market value.",
                price,
                money(Self::fair_price(ctx.product), &self.currency)
            ),
        }
    }

    fn acceptance_message(&self, price: u64) -> String {
        let price = money(price, &self.currency);
        let options = [
            format!(
                "Excellent! {} represents great value for this quality. Let's move forward with \
                 this partnership.",
                price
            ),
            format!("Based on my analysis, {} is a fair deal for both parties. I accept this offer.", price),
            format!(
                "The numbers work at {}. I appreciate finding this mutually beneficial arrangement.",
                price
            ),
        ];
        choose(self.phrases.as_ref(), &options).to_string()
    }
}

impl BuyerAgent for StrategicBuyer {
    fn name(&self) -> &str {
        &self.name
    }

    fn personality(&self) -> &Personality {
        &self.personality
    }

    fn personality_prompt(&self) -> String {
        "I am a strategic analytical buyer who combines data-driven decision making with \
         diplomatic communication. I frequently reference market analysis and use phrases like \
         'Based on my market analysis...' and 'The numbers suggest...'. I approach negotiations \
         as partnership opportunities, often saying 'Let's find a mutually beneficial \
         arrangement' and 'I value quality partnerships'. My tone is professional yet warm, \
         showing respect for both the product quality and the seller's position while being \
         firm about value. I use specific data points and percentages when making arguments."
            .to_string()
    }

    fn open(&self, ctx: &NegotiationContext<'_>) -> Offer {
        let product = ctx.product;

        // 65% of market plus up to 10 points for quality
        let anchor = 650 + quality_multiplier(product.quality_grade) / 10;
        let opening = per_mille(product.base_market_price, anchor);
        let opening = per_mille(opening, origin_premium(&product.origin));
        let opening = opening.min(per_mille(ctx.your_budget, 850));

        let message = format!(
            "Based on my market analysis of {} grade {} from {}, I can offer {}. The numbers \
             suggest this reflects current market conditions while ensuring we both benefit \
             from this partnership.",
            product.quality_grade,
            product.name,
            product.origin,
            money(opening, &self.currency)
        );

        Offer::new(opening, message)
    }

    fn respond(&self, ctx: &NegotiationContext<'_>, seller_price: u64, _seller_message: &str) -> BuyerReply {
        let phase = Phase::of_round(ctx.current_round);

        if self.should_accept(seller_price, ctx, phase) {
            return BuyerReply::accept(seller_price, self.acceptance_message(seller_price));
        }

        let counter = self.counter_offer(seller_price, ctx, phase);
        BuyerReply::counter(counter, self.counter_message(counter, ctx, phase))
    }
}

/// Careful buyer making small incremental offers
pub struct CautiousBuyer {
    name: String,
    personality: Personality,
    currency: String,
}

impl CautiousBuyer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            personality: Personality {
                personality_type: "cautious".to_string(),
                traits: to_strings(&["careful", "budget-conscious", "polite"]),
                negotiation_style: "Makes small incremental offers, very careful with money".to_string(),
                catchphrases: to_strings(&["Let me think about that...", "That's a bit steep for me"]),
                extra: Attributes::new(),
            },
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl BuyerAgent for CautiousBuyer {
    fn name(&self) -> &str {
        &self.name
    }

    fn personality(&self) -> &Personality {
        &self.personality
    }

    fn personality_prompt(&self) -> String {
        "I am a cautious buyer who is very careful with money. I speak politely but firmly. \
         I often say things like 'Let me think about that' or 'That's a bit steep for me'. \
         I make small incremental offers and show concern about my budget."
            .to_string()
    }

    fn open(&self, ctx: &NegotiationContext<'_>) -> Offer {
        let opening = per_mille(ctx.product.base_market_price, 600).min(ctx.your_budget);
        Offer::new(
            opening,
            format!(
                "I'm interested, but {} is what I can offer. Let me think about that...",
                money(opening, &self.currency)
            ),
        )
    }

    fn respond(&self, ctx: &NegotiationContext<'_>, seller_price: u64, _seller_message: &str) -> BuyerReply {
        if seller_price <= ctx.your_budget && seller_price <= per_mille(ctx.product.base_market_price, 850) {
            return BuyerReply::accept(
                seller_price,
                format!("Alright, {} works for me!", money(seller_price, &self.currency)),
            );
        }

        let last = ctx.last_buyer_offer().unwrap_or(0);
        let counter = per_mille(last, 1_100).min(ctx.your_budget);

        // Close to agreement: shave just under the seller's price
        if counter >= per_mille(seller_price, 950) {
            let counter = seller_price.saturating_sub(1_000).min(ctx.your_budget);
            return BuyerReply::counter(
                counter,
                format!("That's a bit steep for me. How about {}?", money(counter, &self.currency)),
            );
        }

        BuyerReply::counter(
            counter,
            format!(
                "I can go up to {}, but that's pushing my budget.",
                money(counter, &self.currency)
            ),
        )
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
