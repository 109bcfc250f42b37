//! Shared fixtures for the integration tests.
//!
//! Each test starts its own server on a fixed per-test port and talks to it
//! over real sockets, so the suites exercise the same code paths a deployed
//! server runs.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use hiroba_server::config::ServerConfig;

/// HMAC secret shared between the test servers and the tokens they verify
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Serialize)]
struct TestClaims {
    #[serde(rename = "userId")]
    user_id: String,
    role: String,
}

/// Sign a join token the way the platform issues them (HS256, no expiry).
pub fn issue_token(user_id: &str) -> String {
    sign_token(user_id, TEST_JWT_SECRET)
}

/// Sign a join token with an arbitrary secret.
pub fn sign_token(user_id: &str, secret: &str) -> String {
    let claims = TestClaims {
        user_id: user_id.to_string(),
        role: "user".to_string(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// In-process presence server for one test
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start a server with the default space and wait until it is ready.
    pub async fn start(port: u16) -> Self {
        Self::start_with_spaces(port, &["default"]).await
    }

    /// Start a server recognizing `spaces` and wait until it is ready.
    pub async fn start_with_spaces(port: u16, spaces: &[&str]) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            spaces: spaces.iter().map(|s| s.to_string()).collect(),
        };

        tokio::spawn(async move {
            if let Err(e) = hiroba_server::run(config).await {
                panic!("Test server exited with error: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", self.base_url());
        for _ in 0..50 {
            if let Ok(response) = client.get(&health_url).send().await
                && response.status() == 200
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Server on port {} did not become ready", self.port);
    }
}

/// Open a WebSocket connection to the server.
pub async fn connect(server: &TestServer) -> WsClient {
    let (socket, _response) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect WebSocket");
    socket
}

/// Send one JSON frame.
pub async fn send_json(socket: &mut WsClient, frame: serde_json::Value) {
    socket
        .send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Receive the next JSON frame, skipping protocol-level ping/pong.
pub async fn recv_json(socket: &mut WsClient) -> serde_json::Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection closed while waiting for a frame")
            .expect("WebSocket error while waiting for a frame");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(&text).expect("Frame should be JSON");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {other:?}"),
        }
    }
}

/// Join `space` as `user` and return the server's reply frame.
pub async fn join(socket: &mut WsClient, space: &str, user: &str) -> serde_json::Value {
    send_json(
        socket,
        json!({
            "type": "join",
            "payload": {"spaceId": space, "token": issue_token(user)},
        }),
    )
    .await;
    recv_json(socket).await
}
