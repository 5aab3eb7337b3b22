//! Memeweaver Types - Canonical domain types for the action pipeline
//!
//! This crate is the foundation layer of the workspace. It defines:
//! - TokenAction: the on-chain action agreed by a prior decision round
//! - TweetRecord / PendingTweet / DraftPost: the social-side records
//! - InteractionDecision: one entry of the model's parsed decision list
//! - SyncedState: the read-only consensus view handed to each behaviour
//! - RoundEvent: the only values a behaviour reports back to the driver
//!
//! # Architectural Invariants
//!
//! 1. Everything read from synchronized data is immutable once read
//! 2. Behaviours surface events, never raw errors, to the consensus layer
//! 3. Wire names are closed enumerations - unknown names fail typed

pub mod action;
pub mod event;
pub mod social;
pub mod sync;

pub use action::*;
pub use event::*;
pub use social::*;
pub use sync::*;
