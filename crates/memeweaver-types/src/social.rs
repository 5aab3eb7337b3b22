//! Social-side records: tweets, drafts and the model's interaction decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the persisted tweet log (newest last)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub tweet_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// The latest not-yet-interacted tweet of another agent, one per handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTweet {
    pub tweet_id: String,
    pub text: String,
    pub user_name: String,
}

/// One post to submit to the social collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPost {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl DraftPost {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_to: None,
            attachment_url: None,
        }
    }

    pub fn replying_to(mut self, tweet_id: impl Into<String>) -> Self {
        self.reply_to = Some(tweet_id.into());
        self
    }

    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }
}

/// The closed set of interactions the model may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    None,
    Like,
    Follow,
    Retweet,
    Reply,
    Quote,
    Tweet,
}

/// One element of the model's decision list.
///
/// Models emit tweet ids as either JSON strings or numbers; both are
/// normalized to a string here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionDecision {
    #[serde(default, deserialize_with = "string_or_number")]
    pub tweet_id: Option<String>,
    pub action: InteractionKind,
    #[serde(default)]
    pub text: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
