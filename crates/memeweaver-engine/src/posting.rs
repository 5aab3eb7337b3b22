//! Shared posting primitives used by the tweet-producing behaviours

use chrono::{DateTime, Utc};
use tracing::{error, info};

use memeweaver_types::{DraftPost, TweetRecord};

use crate::context::RoundContext;

impl RoundContext {
    /// Append one tweet to the persisted tweet log
    pub async fn store_tweet(&self, tweet: TweetRecord) -> crate::Result<()> {
        let mut tweets = self.ledger.load_tweets().await;
        tweets.push(tweet);
        self.ledger.save_tweets(&tweets).await?;
        Ok(())
    }

    /// Post a new top-level tweet.
    ///
    /// Returns the posted record, or `None` when the collaborator reports
    /// total failure (the call is all-or-nothing). `store` controls whether
    /// the tweet also lands in the persisted log.
    pub async fn post_tweet(
        &self,
        text: &str,
        store: bool,
        timestamp: DateTime<Utc>,
    ) -> crate::Result<Option<TweetRecord>> {
        info!(text, "posting tweet");

        let ids = self.social.post(vec![DraftPost::new(text)]).await;
        let Some(ids) = ids.filter(|ids| !ids.is_empty()) else {
            error!("failed posting to the social network");
            return Ok(None);
        };

        let record = TweetRecord {
            tweet_id: ids[0].clone(),
            text: text.to_string(),
            timestamp,
        };

        if store {
            self.store_tweet(record.clone()).await?;
            info!("wrote latest tweet to db");
        }

        Ok(Some(record))
    }

    /// Reply to or quote an existing tweet; true on success.
    ///
    /// A quote composes the attachment reference URL from the author's
    /// handle and the tweet id instead of a reply marker.
    pub async fn respond_tweet(
        &self,
        tweet_id: &str,
        text: &str,
        quote: bool,
        user_name: Option<&str>,
    ) -> bool {
        info!(tweet_id, quote, "responding to tweet");

        let draft = if quote {
            DraftPost::new(text).with_attachment(format!(
                "https://x.com/{}/status/{}",
                user_name.unwrap_or_default(),
                tweet_id
            ))
        } else {
            DraftPost::new(text).replying_to(tweet_id)
        };

        self.social
            .post(vec![draft])
            .await
            .map(|ids| !ids.is_empty())
            .unwrap_or(false)
    }

    /// The latest tweets of a handle, formatted as a numbered list for
    /// prompt building; empty string when the account has none
    pub async fn previous_tweets(&self, handle: &str, limit: usize) -> String {
        self.jitter_delay().await;
        info!(handle, limit, "getting latest tweets");

        let Some(posts) = self.social.user_posts(handle).await.filter(|p| !p.is_empty()) else {
            return String::new();
        };

        posts
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, post)| format!("{}. {}", i + 1, post.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
