//! Forwards single-turn messages to the proxy service resolved via Consul.

pub mod discovery;
pub mod error;
pub mod handlers;
pub mod types;
