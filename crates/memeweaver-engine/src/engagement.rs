//! The engagement pass: decide and execute interactions with other agents

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, info, warn};

use memeweaver_llm::{extract_json, normalize_decisions};
use memeweaver_social::is_post_valid;
use memeweaver_types::{InteractionKind, PendingTweet, RoundEvent, SyncedState};

use crate::context::RoundContext;

const ENGAGEMENT_DECISION_PROMPT: &str = r#"You are an autonomous social agent. Stay in character.

Persona:
{persona}

Your previous tweets:
{previous_tweets}

Tweets from other agents you have not interacted with yet:
{other_tweets}

Current time: {time}

Decide how to engage. Output valid JSON only: a list of decisions, each
{"tweet_id": "...", "action": "none|like|follow|retweet|reply|quote|tweet", "text": "..."}

Rules:
- "text" is required for reply, quote and tweet
- only reference tweet_ids from the list above
- keep replies under the platform length limit"#;

/// Decides and executes this round's social interactions
pub struct EngagementBehaviour {
    ctx: Arc<RoundContext>,
}

impl EngagementBehaviour {
    pub fn new(ctx: Arc<RoundContext>) -> Self {
        Self { ctx }
    }

    /// Run the pass over the given other-agent handles.
    ///
    /// New interactions are merged into the persisted dedup set only when
    /// the pass completes with [`RoundEvent::Done`].
    pub async fn run(
        &self,
        state: &SyncedState,
        agent_handles: Vec<String>,
    ) -> crate::Result<RoundEvent> {
        if self.ctx.config.skip_engagement {
            info!("skipping engagement");
            return Ok(RoundEvent::Done);
        }

        let handles = self.ctx.social.filter_suspended(agent_handles).await;
        info!(?handles, "not suspended users");

        let mut interacted = self.ctx.ledger.load_interacted().await;

        // At most the latest tweet per handle, already-interacted skipped
        let mut pending = BTreeMap::new();
        for handle in &handles {
            let posts = self.ctx.social.user_posts(handle).await;
            let Some(latest) = posts.as_deref().and_then(|p| p.first()) else {
                info!(%handle, "couldn't get any tweets");
                continue;
            };

            if parse_id(&latest.id).is_some_and(|id| interacted.contains(&id)) {
                info!(tweet_id = %latest.id, "tweet was already interacted with");
                continue;
            }

            pending.insert(
                latest.id.clone(),
                PendingTweet {
                    tweet_id: latest.id.clone(),
                    text: latest.text.clone(),
                    user_name: latest.user_name.clone(),
                },
            );
        }

        let (event, new_interacted) = self.interact(state, &pending).await?;

        if event == RoundEvent::Done {
            interacted.extend(new_interacted);
            self.ctx.ledger.save_interacted(&interacted).await?;
            info!("wrote latest interactions to db");
        }

        Ok(event)
    }

    /// One model call, then the decisions applied in list order
    async fn interact(
        &self,
        state: &SyncedState,
        pending: &BTreeMap<String, PendingTweet>,
    ) -> crate::Result<(RoundEvent, Vec<u64>)> {
        let mut new_interacted: Vec<u64> = Vec::new();

        let other_tweets = pending
            .values()
            .map(|t| format!("tweet_id: {}\ntweet_text: {}", t.tweet_id, t.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        let tweets = self.ctx.ledger.load_tweets().await;
        let history = self.ctx.config.prompt_tweet_history;
        let recent = &tweets[tweets.len().saturating_sub(history)..];
        let previous_tweets = if recent.is_empty() {
            "No previous tweets".to_string()
        } else {
            recent
                .iter()
                .map(|t| {
                    format!(
                        "tweet_id: {}\ntweet_text: {}\ntimestamp: {}",
                        t.tweet_id, t.text, t.timestamp
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        let prompt = ENGAGEMENT_DECISION_PROMPT
            .replace("{persona}", &state.persona)
            .replace("{previous_tweets}", &previous_tweets)
            .replace("{other_tweets}", &other_tweets)
            .replace("{time}", &state.timestamp.to_rfc3339());

        let Some(response) = self.ctx.llm.complete(&prompt).await else {
            error!("error getting a response from the model");
            return Ok((RoundEvent::Error, new_interacted));
        };
        info!(response = %response, "model response for engagement decision");

        let decisions = match extract_json(&response) {
            Some(value) => normalize_decisions(value),
            None => Vec::new(),
        };
        if decisions.is_empty() {
            return Ok((RoundEvent::Error, new_interacted));
        }

        for decision in decisions {
            if decision.action == InteractionKind::None {
                continue;
            }

            let tweet_id = decision.tweet_id.clone().unwrap_or_default();

            // Guards against the model hallucinating ids
            if decision.action != InteractionKind::Tweet && !pending.contains_key(&tweet_id) {
                continue;
            }

            self.ctx.jitter_delay().await;

            match decision.action {
                InteractionKind::Tweet => {
                    let Some(text) = decision.text.as_deref() else {
                        warn!("tweet decision without text");
                        continue;
                    };
                    let _ = self.ctx.post_tweet(text, true, state.timestamp).await?;
                }
                InteractionKind::Like => {
                    info!(%tweet_id, "trying to like tweet");
                    if self.ctx.social.like(&tweet_id).await {
                        record_id(&mut new_interacted, &tweet_id);
                    }
                }
                InteractionKind::Follow => {
                    info!(%tweet_id, "trying to follow");
                    if self.ctx.social.follow(&tweet_id).await {
                        record_id(&mut new_interacted, &tweet_id);
                    }
                }
                InteractionKind::Retweet => {
                    info!(%tweet_id, "trying to retweet");
                    if self.ctx.social.retweet(&tweet_id).await {
                        record_id(&mut new_interacted, &tweet_id);
                    }
                }
                InteractionKind::Reply | InteractionKind::Quote => {
                    let Some(text) = decision.text.as_deref() else {
                        warn!(%tweet_id, "response decision without text");
                        continue;
                    };
                    if !is_post_valid(text) {
                        error!(%tweet_id, "the response text is too long");
                        continue;
                    }

                    let quote = decision.action == InteractionKind::Quote;
                    let user_name = pending.get(&tweet_id).map(|t| t.user_name.as_str());
                    let responded = self
                        .ctx
                        .respond_tweet(&tweet_id, text, quote, user_name)
                        .await;
                    if responded {
                        record_id(&mut new_interacted, &tweet_id);
                    }
                }
                InteractionKind::None => {}
            }
        }

        Ok((RoundEvent::Done, new_interacted))
    }
}

fn parse_id(tweet_id: &str) -> Option<u64> {
    tweet_id.parse().ok()
}

fn record_id(new_interacted: &mut Vec<u64>, tweet_id: &str) {
    match parse_id(tweet_id) {
        Some(id) => new_interacted.push(id),
        None => warn!(tweet_id, "interacted tweet id is not numeric"),
    }
}
