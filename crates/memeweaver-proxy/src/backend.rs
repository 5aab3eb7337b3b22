//! The HTTP backend behind the proxy

use async_trait::async_trait;
use serde_json::Value;

use crate::method::ProxyError;

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        // Best effort; a missing .env file is fine
        let _ = dotenvy::dotenv();
        Self {
            base_url: std::env::var("MEMEWEAVER_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            api_key: std::env::var("MEMEWEAVER_BACKEND_API_KEY").ok(),
        }
    }
}

/// The backend surface the dispatcher drives.
///
/// One method per [`crate::ProxyMethod`] variant; the dispatcher maps the
/// envelope's kwargs onto these typed calls.
#[async_trait]
pub trait ProxyBackend: Send + Sync {
    async fn create_agent(&self, agent_data: Value) -> crate::Result<Value>;

    async fn read_agent(&self, agent_id: &str) -> crate::Result<Value>;

    async fn create_twitter_account(
        &self,
        agent_id: &str,
        account_data: Value,
    ) -> crate::Result<Value>;

    async fn get_twitter_account(&self, twitter_user_id: &str) -> crate::Result<Value>;

    async fn create_tweet(
        &self,
        agent_id: &str,
        twitter_user_id: &str,
        tweet_data: Value,
    ) -> crate::Result<Value>;

    async fn read_tweet(&self, tweet_id: &str) -> crate::Result<Value>;

    async fn create_interaction(
        &self,
        agent_id: &str,
        twitter_user_id: &str,
        interaction_data: Value,
    ) -> crate::Result<Value>;
}

/// reqwest-backed [`ProxyBackend`] against the mirror backend service
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(BackendConfig::default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("access-token", key),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> crate::Result<Value> {
        let response = self
            .authed(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| ProxyError::Backend {
                message: e.to_string(),
            })?;
        response.json().await.map_err(|e| ProxyError::Backend {
            message: e.to_string(),
        })
    }

    async fn post(&self, path: &str, body: &Value) -> crate::Result<Value> {
        let response = self
            .authed(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| ProxyError::Backend {
                message: e.to_string(),
            })?;
        response.json().await.map_err(|e| ProxyError::Backend {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ProxyBackend for BackendClient {
    async fn create_agent(&self, agent_data: Value) -> crate::Result<Value> {
        let response = self.post("/api/agents/", &agent_data).await?;
        if response.get("agent_id").is_none() {
            return Err(ProxyError::Backend {
                message: "failed to create agent, no agent_id returned".to_string(),
            });
        }
        Ok(response)
    }

    async fn read_agent(&self, agent_id: &str) -> crate::Result<Value> {
        self.get(&format!("/api/agents/{agent_id}")).await
    }

    async fn create_twitter_account(
        &self,
        agent_id: &str,
        account_data: Value,
    ) -> crate::Result<Value> {
        self.post(
            &format!("/api/agents/{agent_id}/twitter_accounts/"),
            &account_data,
        )
        .await
    }

    async fn get_twitter_account(&self, twitter_user_id: &str) -> crate::Result<Value> {
        self.get(&format!("/api/twitter_accounts/{twitter_user_id}"))
            .await
    }

    async fn create_tweet(
        &self,
        agent_id: &str,
        twitter_user_id: &str,
        tweet_data: Value,
    ) -> crate::Result<Value> {
        self.post(
            &format!("/api/agents/{agent_id}/accounts/{twitter_user_id}/tweets/"),
            &tweet_data,
        )
        .await
    }

    async fn read_tweet(&self, tweet_id: &str) -> crate::Result<Value> {
        self.get(&format!("/api/tweets/{tweet_id}")).await
    }

    async fn create_interaction(
        &self,
        agent_id: &str,
        twitter_user_id: &str,
        interaction_data: Value,
    ) -> crate::Result<Value> {
        self.post(
            &format!("/api/agents/{agent_id}/accounts/{twitter_user_id}/interactions/"),
            &interaction_data,
        )
        .await
    }
}
