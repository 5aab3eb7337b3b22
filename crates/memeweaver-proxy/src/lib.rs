//! Memeweaver Proxy - bridging the agent's envelope protocol to the backend
//!
//! Inbound request envelopes name a backend operation and its arguments;
//! each one is dispatched as its own task against the HTTP backend and the
//! reply is queued as a response envelope carrying the same correlation id.
//!
//! # Invariants
//!
//! 1. The operation set is a closed enumeration; an unknown method name
//!    becomes a typed error reply, never a missing-attribute fault
//! 2. A failure inside a dispatch task becomes an error-carrying reply;
//!    the dispatcher itself never crashes on bad input
//! 3. Disconnecting aborts every in-flight task and closes the queue

mod backend;
mod dispatcher;
mod envelope;
mod method;

pub use backend::{BackendClient, BackendConfig, ProxyBackend};
pub use dispatcher::ProxyDispatcher;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use method::{ProxyError, ProxyMethod};

pub type Result<T> = std::result::Result<T, ProxyError>;
