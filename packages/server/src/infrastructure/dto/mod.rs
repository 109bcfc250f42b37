//! Data transfer objects for the WebSocket wire protocol and the HTTP API.

pub mod http;
pub mod websocket;
