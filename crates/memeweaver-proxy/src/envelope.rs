//! Request and response envelopes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An inbound request: which backend operation to run, with what arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: Uuid,
    pub method: String,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn new(method: impl Into<String>, kwargs: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: method.into(),
            kwargs,
        }
    }
}

/// The queued reply, correlated to its request by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: Uuid,
    pub payload: Value,
    pub error: bool,
}

impl ResponseEnvelope {
    pub fn success(id: Uuid, payload: Value) -> Self {
        Self {
            id,
            payload,
            error: false,
        }
    }

    pub fn failure(id: Uuid, message: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("error".to_string(), Value::String(message.into()));
        Self {
            id,
            payload: Value::Object(payload),
            error: true,
        }
    }
}
