//! Real-time chat and call-signaling relay.
//!
//! Authenticates socket connections, enforces per-request conversation
//! membership, relays chat messages and typing indicators, and forwards
//! WebRTC signaling between the two participants of a help request.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
