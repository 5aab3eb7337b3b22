//! Memeweaver Engine - the per-round behaviours
//!
//! One behaviour runs per consensus round. Each reads the synchronized
//! state and the dedup ledger through an explicit [`RoundContext`] (no
//! ambient globals), performs its external side effects strictly
//! sequentially, and reports a [`memeweaver_types::RoundEvent`] back to the
//! round driver. Per-action failures inside a pass are logged and skipped;
//! only malformed synchronized state propagates as an error.

mod announce;
mod config;
mod context;
mod engagement;
mod feedback;
mod posting;
mod prepare;

pub use announce::ActionAnnounceBehaviour;
pub use config::EngineConfig;
pub use context::{EngineError, RoundContext};
pub use engagement::EngagementBehaviour;
pub use feedback::CollectFeedbackBehaviour;
pub use prepare::{ActionPreparationBehaviour, CheckFundsBehaviour};

pub type Result<T> = std::result::Result<T, EngineError>;
