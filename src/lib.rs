//! Realtime Session Relay
//!
//! A thin client for an Azure-OpenAI-style realtime chat service. Startup is
//! strictly sequential: create a realtime session over HTTP, then hold one
//! WebSocket open and forward conversational items to a webhook. It is
//! structured into submodules for clarity:
//!
//! - `config`: CLI flags, parsed once and passed by reference everywhere.
//! - `session`: the one-shot session-creation call and streaming-URI selection.
//! - `relay`: the WebSocket listener and fire-and-forget webhook forwarding.

pub mod config;
pub mod relay;
pub mod session;
