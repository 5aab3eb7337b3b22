//! The feedback pass: collect and rank replies to the agent's latest tweet

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use memeweaver_social::rank_feedback;
use memeweaver_types::BehaviourOutcome;

use crate::context::RoundContext;

const FEEDBACK_SEARCH_COUNT: usize = 100;

/// Collects replies to the agent's newest tweet and keeps the most
/// engaging ones for the next decision prompt
pub struct CollectFeedbackBehaviour {
    ctx: Arc<RoundContext>,
}

impl CollectFeedbackBehaviour {
    pub fn new(ctx: Arc<RoundContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self) -> crate::Result<BehaviourOutcome> {
        let feedback = self.feedback().await;
        // `None` (API error) serializes as `null`, distinct from `[]`
        let payload =
            serde_json::to_string(&feedback).unwrap_or_else(|_| "null".to_string());
        Ok(BehaviourOutcome::done().with_payload(payload))
    }

    async fn feedback(&self) -> Option<Vec<Value>> {
        let tweets = self.ctx.ledger.load_tweets().await;
        let Some(latest) = tweets.last() else {
            error!("no tweets yet");
            return Some(Vec::new());
        };

        let query = format!("conversation_id:{}", latest.tweet_id);
        match self.ctx.social.search(&query, FEEDBACK_SEARCH_COUNT).await {
            None => {
                error!("could not retrieve any replies due to an API error");
                None
            }
            Some(feedback) if feedback.is_empty() => {
                error!("no tweets match the query");
                Some(Vec::new())
            }
            Some(feedback) => {
                info!(count = feedback.len(), "retrieved replies");
                Some(rank_feedback(feedback))
            }
        }
    }
}
