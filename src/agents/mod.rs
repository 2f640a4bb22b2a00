//! Buyer and seller capability interfaces and reference strategies
//!
//! The driver only ever talks to [`BuyerAgent`] and [`SellerAgent`]. Concrete
//! strategies are picked at construction time through [`BuyerKind`] and
//! [`SellerKind`].

pub mod buyers;
pub mod phrases;
pub mod sellers;

use crate::negotiation::{DealStatus, NegotiationContext};
use crate::types::{Attributes, Product};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use buyers::{CautiousBuyer, StrategicBuyer};
pub use phrases::{FixedPhrase, PhraseSource, RandomPhrases};
pub use sellers::{FriendlySeller, StandardSeller, ToughSeller};

/// A price with its accompanying message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offer {
    pub price: u64,
    pub message: String,
}

impl Offer {
    pub fn new(price: u64, message: impl Into<String>) -> Self {
        Self {
            price,
            message: message.into(),
        }
    }
}

/// Buyer's answer to a seller offer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuyerReply {
    pub status: DealStatus,
    /// Counter-offer; ignored by the driver when `status` is `Accepted`
    pub price: u64,
    pub message: String,
}

impl BuyerReply {
    pub fn accept(price: u64, message: impl Into<String>) -> Self {
        Self {
            status: DealStatus::Accepted,
            price,
            message: message.into(),
        }
    }

    pub fn counter(price: u64, message: impl Into<String>) -> Self {
        Self {
            status: DealStatus::Ongoing,
            price,
            message: message.into(),
        }
    }
}

/// Seller's answer to a buyer offer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellerReply {
    pub price: u64,
    pub message: String,
    /// The seller takes the buyer's current offer as final
    pub accepted: bool,
}

/// Descriptive character sheet; not interpreted by the driver
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub personality_type: String,
    pub traits: Vec<String>,
    pub negotiation_style: String,
    pub catchphrases: Vec<String>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Buyer capability
pub trait BuyerAgent: Send + Sync {
    fn name(&self) -> &str;

    fn personality(&self) -> &Personality;

    /// How the agent should sound, for character-consistency review
    fn personality_prompt(&self) -> String;

    /// First move, made once at round 1. Must stay within `ctx.your_budget`.
    fn open(&self, ctx: &NegotiationContext<'_>) -> Offer;

    /// Every later move, reacting to the seller's latest offer
    fn respond(&self, ctx: &NegotiationContext<'_>, seller_price: u64, seller_message: &str) -> BuyerReply;
}

/// Seller capability
pub trait SellerAgent: Send + Sync {
    fn open(&self, product: &Product) -> Offer;

    /// `round_num` is zero-based
    fn respond(&self, buyer_offer: u64, round_num: u32) -> SellerReply;
}

/// Built-in buyer strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuyerKind {
    #[default]
    Strategic,
    Cautious,
}

impl BuyerKind {
    pub fn build(self, phrases: Arc<dyn PhraseSource>, currency: &str) -> Arc<dyn BuyerAgent> {
        match self {
            BuyerKind::Strategic => {
                Arc::new(StrategicBuyer::new("StrategicAnalyst", phrases).with_currency(currency))
            }
            BuyerKind::Cautious => Arc::new(CautiousBuyer::new("CautiousBuyer").with_currency(currency)),
        }
    }
}

/// Built-in seller strategies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SellerKind {
    #[default]
    Standard,
    Tough,
    Friendly,
}

impl SellerKind {
    pub fn build(self, min_price: u64, currency: &str) -> Box<dyn SellerAgent> {
        match self {
            SellerKind::Standard => Box::new(StandardSeller::new(min_price).with_currency(currency)),
            SellerKind::Tough => Box::new(ToughSeller::new(min_price).with_currency(currency)),
            SellerKind::Friendly => Box::new(FriendlySeller::new(min_price).with_currency(currency)),
        }
    }
}
