//! Reference sellers
//!
//! The three sellers differ only in opening anchor, acceptance margin and
//! concession schedule. Multipliers are per-mille of the reference value.

use crate::config::DEFAULT_CURRENCY;
use crate::money::{money, per_mille};
use crate::types::Product;

use super::{Offer, SellerAgent, SellerReply};

/// Shape of a seller's concession schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Schedule {
    /// Opening price relative to market
    opening: u64,
    /// Accept any offer at or above `min_price * accept_at`
    accept_at: u64,
    /// Counter step before `late_from`
    early_step: u64,
    /// Counter step from round index `late_from` on
    late_step: u64,
    late_from: u32,
}

impl Schedule {
    fn accepts(&self, min_price: u64, buyer_offer: u64) -> bool {
        buyer_offer >= per_mille(min_price, self.accept_at)
    }

    fn is_late(&self, round_num: u32) -> bool {
        round_num >= self.late_from
    }

    /// Counter relative to the buyer's offer, never under the floor
    fn counter(&self, min_price: u64, buyer_offer: u64, round_num: u32) -> u64 {
        let step = if self.is_late(round_num) {
            self.late_step
        } else {
            self.early_step
        };
        per_mille(buyer_offer, step).max(min_price)
    }
}

const STANDARD: Schedule = Schedule {
    opening: 1_500,
    accept_at: 1_100,
    early_step: 1_150,
    late_step: 1_050,
    late_from: 8,
};

const TOUGH: Schedule = Schedule {
    opening: 1_700,
    accept_at: 1_120,
    early_step: 1_120,
    late_step: 1_060,
    late_from: 7,
};

const FRIENDLY: Schedule = Schedule {
    opening: 1_350,
    accept_at: 1_080,
    early_step: 1_100,
    late_step: 1_040,
    late_from: 6,
};

/// Baseline seller: opens at 150% of market and wants 10% over its floor
#[derive(Clone, Debug)]
pub struct StandardSeller {
    min_price: u64,
    currency: String,
}

impl StandardSeller {
    pub fn new(min_price: u64) -> Self {
        Self {
            min_price,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl SellerAgent for StandardSeller {
    fn open(&self, product: &Product) -> Offer {
        let price = per_mille(product.base_market_price, STANDARD.opening);
        Offer::new(
            price,
            format!(
                "These are premium {} grade {}. I'm asking {}.",
                product.quality_grade,
                product.name,
                money(price, &self.currency)
            ),
        )
    }

    fn respond(&self, buyer_offer: u64, round_num: u32) -> SellerReply {
        if STANDARD.accepts(self.min_price, buyer_offer) {
            return SellerReply {
                price: buyer_offer,
                message: format!("You have a deal at {}!", money(buyer_offer, &self.currency)),
                accepted: true,
            };
        }

        let counter = STANDARD.counter(self.min_price, buyer_offer, round_num);
        let message = if STANDARD.is_late(round_num) {
            format!("Final offer: {}. Take it or leave it.", money(counter, &self.currency))
        } else {
            format!("I can come down to {}.", money(counter, &self.currency))
        };

        SellerReply {
            price: counter,
            message,
            accepted: false,
        }
    }
}

/// Opens higher and concedes slower
#[derive(Clone, Debug)]
pub struct ToughSeller {
    min_price: u64,
    currency: String,
}

impl ToughSeller {
    pub fn new(min_price: u64) -> Self {
        Self {
            min_price,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl SellerAgent for ToughSeller {
    fn open(&self, product: &Product) -> Offer {
        let price = per_mille(product.base_market_price, TOUGH.opening);
        Offer::new(
            price,
            format!(
                "Top-tier {} {}. Opening at {}.",
                product.quality_grade,
                product.name,
                money(price, &self.currency)
            ),
        )
    }

    fn respond(&self, buyer_offer: u64, round_num: u32) -> SellerReply {
        if TOUGH.accepts(self.min_price, buyer_offer) {
            return SellerReply {
                price: buyer_offer,
                message: format!("Fine. Deal at {}.", money(buyer_offer, &self.currency)),
                accepted: true,
            };
        }

        let counter = TOUGH.counter(self.min_price, buyer_offer, round_num);
        let message = if TOUGH.is_late(round_num) {
            format!("Last stretch: {}.", money(counter, &self.currency))
        } else {
            format!("Not close. {}.", money(counter, &self.currency))
        };

        SellerReply {
            price: counter,
            message,
            accepted: false,
        }
    }
}

/// Cooperative: lower opening and faster convergence
#[derive(Clone, Debug)]
pub struct FriendlySeller {
    min_price: u64,
    currency: String,
}

impl FriendlySeller {
    pub fn new(min_price: u64) -> Self {
        Self {
            min_price,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl SellerAgent for FriendlySeller {
    fn open(&self, product: &Product) -> Offer {
        let price = per_mille(product.base_market_price, FRIENDLY.opening);
        Offer::new(
            price,
            format!(
                "Fair price for good {} {}: {} to start.",
                product.quality_grade,
                product.name,
                money(price, &self.currency)
            ),
        )
    }

    fn respond(&self, buyer_offer: u64, round_num: u32) -> SellerReply {
        if FRIENDLY.accepts(self.min_price, buyer_offer) {
            return SellerReply {
                price: buyer_offer,
                message: format!("Happy to agree at {}!", money(buyer_offer, &self.currency)),
                accepted: true,
            };
        }

        let counter = FRIENDLY.counter(self.min_price, buyer_offer, round_num);
        SellerReply {
            price: counter,
            message: format!("I can meet you at {}.", money(counter, &self.currency)),
            accepted: false,
        }
    }
}
