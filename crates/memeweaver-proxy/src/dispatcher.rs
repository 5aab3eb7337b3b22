//! Task-per-request dispatch with correlation and cancellation

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::ProxyBackend;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::method::{ProxyError, ProxyMethod};

/// Correlates request envelopes with backend replies.
///
/// Each accepted envelope runs as its own task; replies drain through
/// [`ProxyDispatcher::receive`] in completion order. Disconnecting aborts
/// every in-flight task, after which `receive` reports the closed queue.
pub struct ProxyDispatcher {
    backend: Arc<dyn ProxyBackend>,
    in_flight: Arc<DashMap<Uuid, JoinHandle<()>>>,
    responses_tx: Mutex<Option<mpsc::UnboundedSender<ResponseEnvelope>>>,
    responses_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<ResponseEnvelope>>,
}

impl ProxyDispatcher {
    pub fn connect(backend: Arc<dyn ProxyBackend>) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            in_flight: Arc::new(DashMap::new()),
            responses_tx: Mutex::new(Some(responses_tx)),
            responses_rx: tokio::sync::Mutex::new(responses_rx),
        }
    }

    /// Accept an envelope for dispatch; fails only when disconnected
    pub fn send(&self, envelope: RequestEnvelope) -> crate::Result<()> {
        let tx = self
            .responses_tx
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or(ProxyError::Disconnected)?;

        let id = envelope.id;
        let backend = self.backend.clone();
        let in_flight = self.in_flight.clone();

        let handle = tokio::spawn(async move {
            let response = match handle_envelope(backend.as_ref(), &envelope).await {
                Ok(payload) => ResponseEnvelope::success(envelope.id, payload),
                Err(e) => {
                    error!(method = %envelope.method, error = %e, "dispatch failed");
                    ResponseEnvelope::failure(envelope.id, e.to_string())
                }
            };
            let _ = tx.send(response);
            in_flight.remove(&id);
        });

        // If the task already finished, this records a completed handle;
        // aborting it later is a no-op.
        self.in_flight.insert(id, handle);
        Ok(())
    }

    /// Next completed reply; `None` once disconnected and drained
    pub async fn receive(&self) -> Option<ResponseEnvelope> {
        self.responses_rx.lock().await.recv().await
    }

    /// Abort all in-flight dispatch tasks and close the response queue
    pub fn disconnect(&self) {
        info!(in_flight = self.in_flight.len(), "disconnecting proxy dispatcher");

        if let Ok(mut tx) = self.responses_tx.lock() {
            tx.take();
        }

        for entry in self.in_flight.iter() {
            entry.value().abort();
        }
        self.in_flight.clear();
    }
}

async fn handle_envelope(
    backend: &dyn ProxyBackend,
    envelope: &RequestEnvelope,
) -> crate::Result<Value> {
    let method = ProxyMethod::parse(&envelope.method)?;
    let kwargs = &envelope.kwargs;

    match method {
        ProxyMethod::CreateAgent => {
            backend
                .create_agent(required(kwargs, method, "agent_data")?)
                .await
        }
        ProxyMethod::ReadAgent => {
            backend
                .read_agent(required_str(kwargs, method, "agent_id")?)
                .await
        }
        ProxyMethod::CreateTwitterAccount => {
            backend
                .create_twitter_account(
                    required_str(kwargs, method, "agent_id")?,
                    required(kwargs, method, "account_data")?,
                )
                .await
        }
        ProxyMethod::GetTwitterAccount => {
            backend
                .get_twitter_account(required_str(kwargs, method, "twitter_user_id")?)
                .await
        }
        ProxyMethod::CreateTweet => {
            backend
                .create_tweet(
                    required_str(kwargs, method, "agent_id")?,
                    required_str(kwargs, method, "twitter_user_id")?,
                    required(kwargs, method, "tweet_data")?,
                )
                .await
        }
        ProxyMethod::ReadTweet => {
            backend
                .read_tweet(required_str(kwargs, method, "tweet_id")?)
                .await
        }
        ProxyMethod::CreateInteraction => {
            backend
                .create_interaction(
                    required_str(kwargs, method, "agent_id")?,
                    required_str(kwargs, method, "twitter_user_id")?,
                    required(kwargs, method, "interaction_data")?,
                )
                .await
        }
    }
}

fn required(
    kwargs: &Map<String, Value>,
    method: ProxyMethod,
    field: &'static str,
) -> crate::Result<Value> {
    kwargs
        .get(field)
        .cloned()
        .ok_or(ProxyError::MissingArgument { method, field })
}

fn required_str<'a>(
    kwargs: &'a Map<String, Value>,
    method: ProxyMethod,
    field: &'static str,
) -> crate::Result<&'a str> {
    kwargs
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ProxyError::MissingArgument { method, field })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Echoes the called method; `slow` parks every call forever
    struct EchoBackend {
        slow: bool,
    }

    impl EchoBackend {
        async fn reply(&self, method: &str, detail: Value) -> crate::Result<Value> {
            if self.slow {
                // Far longer than any test timeout; only aborts end it
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(json!({"method": method, "detail": detail}))
        }
    }

    #[async_trait]
    impl ProxyBackend for EchoBackend {
        async fn create_agent(&self, agent_data: Value) -> crate::Result<Value> {
            self.reply("create_agent", agent_data).await
        }

        async fn read_agent(&self, agent_id: &str) -> crate::Result<Value> {
            self.reply("read_agent", json!(agent_id)).await
        }

        async fn create_twitter_account(
            &self,
            agent_id: &str,
            _account_data: Value,
        ) -> crate::Result<Value> {
            self.reply("create_twitter_account", json!(agent_id)).await
        }

        async fn get_twitter_account(&self, twitter_user_id: &str) -> crate::Result<Value> {
            self.reply("get_twitter_account", json!(twitter_user_id)).await
        }

        async fn create_tweet(
            &self,
            _agent_id: &str,
            _twitter_user_id: &str,
            tweet_data: Value,
        ) -> crate::Result<Value> {
            self.reply("create_tweet", tweet_data).await
        }

        async fn read_tweet(&self, tweet_id: &str) -> crate::Result<Value> {
            self.reply("read_tweet", json!(tweet_id)).await
        }

        async fn create_interaction(
            &self,
            _agent_id: &str,
            _twitter_user_id: &str,
            interaction_data: Value,
        ) -> crate::Result<Value> {
            self.reply("create_interaction", interaction_data).await
        }
    }

    fn dispatcher(slow: bool) -> ProxyDispatcher {
        ProxyDispatcher::connect(Arc::new(EchoBackend { slow }))
    }

    fn kwargs(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_reply_preserves_correlation_id() {
        let dispatcher = dispatcher(false);
        let envelope = RequestEnvelope::new("read_tweet", kwargs(&[("tweet_id", json!("42"))]));
        let id = envelope.id;

        dispatcher.send(envelope).unwrap();
        let reply = dispatcher.receive().await.unwrap();

        assert_eq!(reply.id, id);
        assert!(!reply.error);
        assert_eq!(reply.payload["method"], "read_tweet");
    }

    #[tokio::test]
    async fn test_unknown_method_becomes_error_reply() {
        let dispatcher = dispatcher(false);
        let envelope = RequestEnvelope::new("drop_database", Map::new());
        let id = envelope.id;

        dispatcher.send(envelope).unwrap();
        let reply = dispatcher.receive().await.unwrap();

        assert_eq!(reply.id, id);
        assert!(reply.error);
        assert!(reply.payload["error"]
            .as_str()
            .unwrap()
            .contains("drop_database"));
    }

    #[tokio::test]
    async fn test_missing_argument_becomes_error_reply() {
        let dispatcher = dispatcher(false);
        let envelope = RequestEnvelope::new("read_agent", Map::new());

        dispatcher.send(envelope).unwrap();
        let reply = dispatcher.receive().await.unwrap();

        assert!(reply.error);
        assert!(reply.payload["error"].as_str().unwrap().contains("agent_id"));
    }

    #[tokio::test]
    async fn test_concurrent_requests_all_answered() {
        let dispatcher = dispatcher(false);
        let mut ids = Vec::new();
        for i in 0..5 {
            let envelope = RequestEnvelope::new(
                "read_tweet",
                kwargs(&[("tweet_id", json!(i.to_string()))]),
            );
            ids.push(envelope.id);
            dispatcher.send(envelope).unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(dispatcher.receive().await.unwrap().id);
        }
        seen.sort();
        ids.sort();
        assert_eq!(seen, ids);
    }

    #[tokio::test]
    async fn test_disconnect_cancels_in_flight_work() {
        let dispatcher = dispatcher(true);
        let envelope =
            RequestEnvelope::new("read_tweet", kwargs(&[("tweet_id", json!("42"))]));
        dispatcher.send(envelope).unwrap();

        dispatcher.disconnect();

        // The aborted task never replies and the queue is closed
        assert!(dispatcher.receive().await.is_none());
        assert!(matches!(
            dispatcher.send(RequestEnvelope::new("read_tweet", Map::new())),
            Err(ProxyError::Disconnected)
        ));
    }
}
