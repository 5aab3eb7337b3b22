use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use memeweaver_chain::{
    ActionBuilder, ChainStateClient, ContractCallable, ContractClient, ContractResponse,
    SafeClient,
};
use memeweaver_engine::{
    ActionAnnounceBehaviour, CollectFeedbackBehaviour, EngagementBehaviour, EngineConfig,
    RoundContext,
};
use memeweaver_llm::LlmClient;
use memeweaver_social::{SocialClient, SocialPost};
use memeweaver_store::{AgentLedger, InMemoryStore};
use memeweaver_types::{DraftPost, RoundEvent, SyncedState, TokenAction, TokenActionKind};

#[derive(Default)]
struct MockSocial {
    posts_by_handle: HashMap<String, Vec<SocialPost>>,
    post_ids: Option<Vec<String>>,
    /// What `search` reports; `None` simulates an API error
    search_results: Option<Vec<Value>>,
    posted: Mutex<Vec<DraftPost>>,
    liked: Mutex<Vec<String>>,
    retweeted: Mutex<Vec<String>>,
    followed: Mutex<Vec<String>>,
}

impl MockSocial {
    fn with_latest_tweet(handle: &str, tweet_id: &str, text: &str) -> Self {
        let mut posts_by_handle = HashMap::new();
        posts_by_handle.insert(
            handle.to_string(),
            vec![SocialPost {
                id: tweet_id.to_string(),
                text: text.to_string(),
                user_name: handle.to_string(),
            }],
        );
        Self {
            posts_by_handle,
            post_ids: Some(vec!["900".to_string()]),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SocialClient for MockSocial {
    async fn post(&self, posts: Vec<DraftPost>) -> Option<Vec<String>> {
        self.posted.lock().unwrap().extend(posts);
        self.post_ids.clone()
    }

    async fn like(&self, tweet_id: &str) -> bool {
        self.liked.lock().unwrap().push(tweet_id.to_string());
        true
    }

    async fn retweet(&self, tweet_id: &str) -> bool {
        self.retweeted.lock().unwrap().push(tweet_id.to_string());
        true
    }

    async fn follow(&self, user_id: &str) -> bool {
        self.followed.lock().unwrap().push(user_id.to_string());
        true
    }

    async fn user_posts(&self, handle: &str) -> Option<Vec<SocialPost>> {
        self.posts_by_handle.get(handle).cloned()
    }

    async fn search(&self, _query: &str, _count: usize) -> Option<Vec<Value>> {
        self.search_results.clone()
    }

    async fn filter_suspended(&self, handles: Vec<String>) -> Vec<String> {
        handles
    }
}

struct MockLlm {
    response: Option<String>,
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _prompt: &str) -> Option<String> {
        self.response.clone()
    }
}

struct StubContracts;

#[async_trait]
impl ContractClient for StubContracts {
    async fn call(
        &self,
        _contract_address: &str,
        _callable: ContractCallable,
        _chain_id: &str,
        _kwargs: Map<String, Value>,
    ) -> ContractResponse {
        ContractResponse::error("not exercised by this test")
    }
}

struct StubSafe;

#[async_trait]
impl SafeClient for StubSafe {
    async fn raw_hash(
        &self,
        _safe_address: &str,
        _to_address: &str,
        _value: u128,
        _data: &[u8],
        _safe_tx_gas: u64,
        _chain_id: &str,
    ) -> ContractResponse {
        ContractResponse::error("not exercised by this test")
    }
}

struct StubChainState;

#[async_trait]
impl ChainStateClient for StubChainState {
    async fn native_balance(&self, _address: &str, _chain_id: &str) -> Option<u128> {
        Some(1)
    }
}

fn context(
    social: Arc<MockSocial>,
    llm: Arc<MockLlm>,
) -> (Arc<RoundContext>, AgentLedger) {
    let ledger = AgentLedger::new(Arc::new(InMemoryStore::new()));
    let config = EngineConfig {
        skip_engagement: false,
        max_action_delay_secs: 0,
        minimum_gas_balance: 0,
        prompt_tweet_history: 5,
    };
    let actions = ActionBuilder::new(Arc::new(StubContracts), Arc::new(StubSafe), ledger.clone());
    let ctx = Arc::new(RoundContext::new(
        config,
        ledger.clone(),
        social,
        llm,
        actions,
        Arc::new(StubChainState),
    ));
    (ctx, ledger)
}

fn synced_state() -> SyncedState {
    SyncedState {
        persona: "degen bot".to_string(),
        agent_address: "0xa9e7".to_string(),
        safe_contract_address: "0x5afe".to_string(),
        meme_factory_address: "0xfac7".to_string(),
        chain_id: "8453".to_string(),
        token_action: None,
        final_tx_hash: None,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_engagement_likes_pending_tweet() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some(r#"json[{"tweet_id": "111", "action": "like"}]"#.to_string()),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Done);
    assert_eq!(*social.liked.lock().unwrap(), vec!["111"]);
    assert_eq!(ledger.load_interacted().await, vec![111]);
}

#[tokio::test]
async fn test_engagement_is_idempotent_for_interacted_ids() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some(r#"json[{"tweet_id": "111", "action": "like"}]"#.to_string()),
    });
    let (ctx, ledger) = context(social.clone(), llm);
    ledger.save_interacted(&[111]).await.unwrap();

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    // Zero external actions, done with no new ids
    assert_eq!(event, RoundEvent::Done);
    assert!(social.liked.lock().unwrap().is_empty());
    assert!(social.posted.lock().unwrap().is_empty());
    assert_eq!(ledger.load_interacted().await, vec![111]);
}

#[tokio::test]
async fn test_engagement_fails_on_undecodable_response() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some("I'd rather monologue than emit structured output.".to_string()),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Error);
    // Nothing is persisted on an error event
    assert!(ledger.load_interacted().await.is_empty());
}

#[tokio::test]
async fn test_engagement_fails_when_model_is_down() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, _) = context(social, llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Error);
}

#[tokio::test]
async fn test_engagement_skips_hallucinated_ids() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some(r#"json[{"tweet_id": "999", "action": "retweet"}]"#.to_string()),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Done);
    assert!(social.retweeted.lock().unwrap().is_empty());
    assert!(ledger.load_interacted().await.is_empty());
}

#[tokio::test]
async fn test_engagement_skips_oversized_reply() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let oversized = "a".repeat(281);
    let llm = Arc::new(MockLlm {
        response: Some(format!(
            r#"json[{{"tweet_id": "111", "action": "reply", "text": "{oversized}"}}]"#
        )),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    // The oversized reply is skipped, the round still completes
    assert_eq!(event, RoundEvent::Done);
    assert!(social.posted.lock().unwrap().is_empty());
    assert!(ledger.load_interacted().await.is_empty());
}

#[tokio::test]
async fn test_engagement_quote_composes_attachment_url() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some(
            r#"json[{"tweet_id": "111", "action": "quote", "text": "this tbh"}]"#.to_string(),
        ),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Done);
    let posted = social.posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(
        posted[0].attachment_url.as_deref(),
        Some("https://x.com/alice/status/111")
    );
    assert!(posted[0].reply_to.is_none());
    drop(posted);
    assert_eq!(ledger.load_interacted().await, vec![111]);
}

#[tokio::test]
async fn test_engagement_tweet_decision_is_stored() {
    let social = Arc::new(MockSocial::with_latest_tweet("alice", "111", "gm"));
    let llm = Arc::new(MockLlm {
        response: Some(r#"json[{"action": "tweet", "text": "wagmi"}]"#.to_string()),
    });
    let (ctx, ledger) = context(social.clone(), llm);

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec!["alice".to_string()])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Done);
    let tweets = ledger.load_tweets().await;
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].tweet_id, "900");
    assert_eq!(tweets[0].text, "wagmi");
}

#[tokio::test]
async fn test_skip_engagement_reports_done() {
    let ledger = AgentLedger::new(Arc::new(InMemoryStore::new()));
    let config = EngineConfig {
        skip_engagement: true,
        max_action_delay_secs: 0,
        minimum_gas_balance: 0,
        prompt_tweet_history: 5,
    };
    let actions = ActionBuilder::new(Arc::new(StubContracts), Arc::new(StubSafe), ledger.clone());
    let ctx = Arc::new(RoundContext::new(
        config,
        ledger,
        Arc::new(MockSocial::default()),
        Arc::new(MockLlm { response: None }),
        actions,
        Arc::new(StubChainState),
    ));

    let event = EngagementBehaviour::new(ctx)
        .run(&synced_state(), vec![])
        .await
        .unwrap();

    assert_eq!(event, RoundEvent::Done);
}

#[tokio::test]
async fn test_announce_posts_without_storing() {
    let social = Arc::new(MockSocial {
        post_ids: Some(vec!["901".to_string()]),
        ..MockSocial::default()
    });
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, ledger) = context(social.clone(), llm);

    let mut action = TokenAction::new(TokenActionKind::Summon);
    action.tweet = Some("just summoned $PEPC".to_string());
    let mut state = synced_state();
    state.token_action = Some(action);

    let event = ActionAnnounceBehaviour::new(ctx).run(&state).await.unwrap();

    assert_eq!(event, RoundEvent::Done);
    assert_eq!(social.posted.lock().unwrap().len(), 1);
    // The announcement never lands in the tweet log
    assert!(ledger.load_tweets().await.is_empty());
}

#[tokio::test]
async fn test_previous_tweets_format_as_numbered_list() {
    let mut social = MockSocial::with_latest_tweet("alice", "111", "gm");
    social
        .posts_by_handle
        .get_mut("alice")
        .unwrap()
        .push(SocialPost {
            id: "110".to_string(),
            text: "wen moon".to_string(),
            user_name: "alice".to_string(),
        });
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, _) = context(Arc::new(social), llm);

    let listing = ctx.previous_tweets("alice", 20).await;
    assert_eq!(listing, "1. gm\n2. wen moon");

    // A handle with no tweets formats as nothing at all
    assert_eq!(ctx.previous_tweets("nobody", 20).await, "");
}

#[tokio::test]
async fn test_feedback_ranks_replies() {
    let social = Arc::new(MockSocial {
        search_results: Some(vec![
            serde_json::json!({"id": "quiet", "view_count": 1}),
            serde_json::json!({"id": "loud", "view_count": 2, "quote_count": 4}),
        ]),
        ..MockSocial::default()
    });
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, ledger) = context(social, llm);

    ledger
        .save_tweets(&[memeweaver_types::TweetRecord {
            tweet_id: "900".to_string(),
            text: "gm".to_string(),
            timestamp: Utc::now(),
        }])
        .await
        .unwrap();

    let outcome = CollectFeedbackBehaviour::new(ctx).run().await.unwrap();

    assert_eq!(outcome.event, RoundEvent::Done);
    let payload: Vec<Value> = serde_json::from_str(outcome.payload.as_deref().unwrap()).unwrap();
    assert_eq!(payload[0]["id"], "loud");
    assert_eq!(payload[1]["id"], "quiet");
}

#[tokio::test]
async fn test_feedback_api_error_reports_null_payload() {
    let social = Arc::new(MockSocial::default());
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, ledger) = context(social, llm);

    ledger
        .save_tweets(&[memeweaver_types::TweetRecord {
            tweet_id: "900".to_string(),
            text: "gm".to_string(),
            timestamp: Utc::now(),
        }])
        .await
        .unwrap();

    let outcome = CollectFeedbackBehaviour::new(ctx).run().await.unwrap();
    assert_eq!(outcome.event, RoundEvent::Done);
    assert_eq!(outcome.payload.as_deref(), Some("null"));
}

#[tokio::test]
async fn test_feedback_without_own_tweets_is_empty() {
    let social = Arc::new(MockSocial {
        search_results: Some(vec![serde_json::json!({"id": "stray"})]),
        ..MockSocial::default()
    });
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, _) = context(social, llm);

    let outcome = CollectFeedbackBehaviour::new(ctx).run().await.unwrap();
    assert_eq!(outcome.payload.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_announce_fails_when_post_fails() {
    let social = Arc::new(MockSocial {
        post_ids: None,
        ..MockSocial::default()
    });
    let llm = Arc::new(MockLlm { response: None });
    let (ctx, _) = context(social, llm);

    let mut action = TokenAction::new(TokenActionKind::Heart);
    action.tweet = Some("hearted a gem".to_string());
    let mut state = synced_state();
    state.token_action = Some(action);

    let event = ActionAnnounceBehaviour::new(ctx).run(&state).await.unwrap();
    assert_eq!(event, RoundEvent::Error);
}
