//! Tool-driven state for two voice agents: a barista taking coffee orders and
//! a wellness companion running daily check-ins.
//!
//! Speech, turn-taking and model calls belong to the hosting voice framework.
//! This crate owns what the LLM's tool calls touch: the slot state, its JSON
//! persistence, the tool schemas and the session bookkeeping around them.

pub mod assistant;
pub mod checkin;
pub mod config;
pub mod error;
pub mod llm;
pub mod order;
pub mod protocol;
pub mod session;
pub mod slots;
pub mod store;
pub mod vad;

pub use error::{AgentError, Result};
