//! The action-announcement pass: one pre-composed post, as-is

use std::sync::Arc;

use tracing::{error, info};

use memeweaver_types::{RoundEvent, SyncedState};

use crate::context::RoundContext;

/// Posts the announcement text carried by the agreed token action.
///
/// Unlike the engagement pass, the announcement is never written to the
/// tweet log - it belongs to the action, not to the agent's feed history.
pub struct ActionAnnounceBehaviour {
    ctx: Arc<RoundContext>,
}

impl ActionAnnounceBehaviour {
    pub fn new(ctx: Arc<RoundContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, state: &SyncedState) -> crate::Result<RoundEvent> {
        let text = state
            .token_action
            .as_ref()
            .and_then(|action| action.tweet.clone());
        let Some(text) = text else {
            error!("token action carries no announcement text");
            return Ok(RoundEvent::Error);
        };

        info!("sending the action tweet");
        let posted = self.ctx.post_tweet(&text, false, state.timestamp).await?;

        Ok(match posted {
            Some(_) => RoundEvent::Done,
            None => RoundEvent::Error,
        })
    }
}
