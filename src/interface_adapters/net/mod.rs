// Network adapter for client WebSocket sessions.

pub mod client;

pub use client::{world_update_serializer, ws_handler};
