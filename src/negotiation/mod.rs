//! Alternating-offer negotiation protocol

pub mod engine;
pub mod outcome;
pub mod session;
pub mod types;

pub use engine::{run_negotiation, NegotiationEngine};
pub use outcome::{DealMetrics, NegotiationResult};
pub use session::NegotiationSession;
pub use types::{
    DealStatus, NegotiationContext, NegotiationProgress, NegotiationState, PolicyViolation,
    TranscriptEntry,
};
