//! Memeweaver LLM - model collaborator contract and free-text JSON recovery
//!
//! The engine treats the model as a function from prompt to raw text. This
//! crate owns the narrow contract for that call plus the recovery of
//! machine-readable JSON from the unstructured reply: an ordered list of
//! extraction patterns is tried and the first candidate that decodes wins.
//! Model output is untrusted input; nothing here panics on malformed text.

mod client;
mod extract;

pub use client::LlmClient;
pub use extract::{extract_json, normalize_decisions};
