//! haggle: turn-based buyer/seller price negotiation simulator
//!
//! A seller opens, then buyer and seller alternate offers until one side
//! accepts, the buyer walks away, or the round cap is reached.
//! - [`negotiation`]: the context, state machine, round driver and result metrics
//! - [`agents`]: buyer and seller capability traits plus reference strategies
//! - [`scenario`]: easy/medium/hard budget presets
//! - [`cli`]: batch suite runner and command-line surface

pub mod agents;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod money;
pub mod negotiation;
pub mod scenario;
pub mod types;

// Re-export commonly used types and functions
pub use agents::{BuyerAgent, BuyerKind, SellerAgent, SellerKind};
pub use config::{BudgetPolicy, Settings};
pub use error::{HaggleError, Result};
pub use negotiation::{run_negotiation, DealStatus, NegotiationContext, NegotiationEngine, NegotiationResult};
pub use scenario::{scenario_triplets, Difficulty, ScenarioPreset, ScenarioTriplet};
pub use types::{Product, QualityGrade, Role};
