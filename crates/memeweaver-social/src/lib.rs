//! Memeweaver Social - the social-network side of the action pipeline
//!
//! Owns the collaborator contract for the external social client, the
//! platform's weighted post-length rule, and the engagement-weighted
//! feedback ranker. Network calls, authentication and wire formats live in
//! the collaborator; this crate only validates and ranks.

mod client;
mod feedback;
mod length;

pub use client::{SocialClient, SocialPost};
pub use feedback::{engagement_score, rank_feedback, FEEDBACK_TOP_N};
pub use length::{is_post_valid, weighted_len, MAX_POST_WEIGHT};
