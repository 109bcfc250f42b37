//! WebSocket protocol integration tests.
//!
//! Multi-client presence scenarios driven over real sockets: join
//! handshakes, movement validation, broadcast fan-out and the silent-close
//! behavior on rejected joins and protocol violations.

mod fixtures;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use fixtures::{TestServer, WsClient, connect, issue_token, join, recv_json, send_json};

/// Sign a token with a secret the server does not know.
fn forged_token(user_id: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"userId": user_id, "role": "user"}),
        &jsonwebtoken::EncodingKey::from_secret(b"completely-different-secret"),
    )
    .expect("Failed to sign forged token")
}

/// Assert that no frame arrives within a grace window.
async fn expect_silence(socket: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(300), socket.next()).await;
    assert!(result.is_err(), "Expected no frame, got {:?}", result);
}

/// Assert the server terminates the connection without sending any frame.
async fn expect_closed_without_response(socket: &mut WsClient) {
    loop {
        match tokio::time::timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("Timed out waiting for the connection to close")
        {
            None => return,
            Some(Ok(Message::Close(_))) => return,
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(other)) => panic!("Expected close, got frame: {other:?}"),
            // Dropped without a closing handshake also counts as closed
            Some(Err(_)) => return,
        }
    }
}

#[tokio::test]
async fn test_join_returns_spawn_and_empty_manifest() {
    // テスト項目: 空のスペースへの join で spawn (0,0) と空の参加者リストが返る
    // given (前提条件):
    let server = TestServer::start(19180).await;
    let mut alice = connect(&server).await;

    // when (操作):
    let reply = join(&mut alice, "default", "alice").await;

    // then (期待する結果):
    assert_eq!(
        reply,
        json!({
            "type": "space-joined",
            "payload": {"spawn": {"x": 0, "y": 0}, "users": []},
        })
    );
}

#[tokio::test]
async fn test_join_notifies_existing_and_lists_them() {
    // テスト項目: 2 人目の join で既存参加者に user-joined が届き、本人には既存参加者リストが返る
    // given (前提条件): alice が在室
    let server = TestServer::start(19181).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "default", "alice").await;

    // when (操作): bob が参加
    let mut bob = connect(&server).await;
    let reply = join(&mut bob, "default", "bob").await;

    // then (期待する結果): bob のリストには alice だけが載る
    assert_eq!(reply["payload"]["users"], json!([{"userId": "alice"}]));

    // alice には bob の user-joined が届く
    assert_eq!(
        recv_json(&mut alice).await,
        json!({
            "type": "user-joined",
            "payload": {"x": 0, "y": 0, "userId": "bob"},
        })
    );
}

#[tokio::test]
async fn test_join_with_forged_token_closes_without_response() {
    // テスト項目: 偽造トークンでの join は応答フレームなしで切断される
    // given (前提条件):
    let server = TestServer::start(19182).await;
    let mut alice = connect(&server).await;

    // when (操作):
    send_json(
        &mut alice,
        json!({
            "type": "join",
            "payload": {"spaceId": "default", "token": forged_token("alice")},
        }),
    )
    .await;

    // then (期待する結果):
    expect_closed_without_response(&mut alice).await;
}

#[tokio::test]
async fn test_join_unknown_space_closes_without_response() {
    // テスト項目: 存在しないスペースへの join も応答フレームなしで切断される
    // given (前提条件): サーバーは "default" しか知らない
    let server = TestServer::start(19183).await;
    let mut alice = connect(&server).await;

    // when (操作):
    send_json(
        &mut alice,
        json!({
            "type": "join",
            "payload": {"spaceId": "void", "token": issue_token("alice")},
        }),
    )
    .await;

    // then (期待する結果): 認証失敗と区別のつかない切断
    expect_closed_without_response(&mut alice).await;
}

#[tokio::test]
async fn test_accepted_move_echoes_and_broadcasts() {
    // テスト項目: 1 マス移動が受理され、本人と他の参加者の両方にフレームが届く
    // given (前提条件): alice と bob が在室
    let server = TestServer::start(19184).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "default", "alice").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "default", "bob").await;
    recv_json(&mut alice).await; // bob の user-joined

    // when (操作): alice が (0,0) → (1,0)
    send_json(&mut alice, json!({"type": "move", "payload": {"x": 1, "y": 0}})).await;

    // then (期待する結果): 本人に movement-accepted、bob に move
    assert_eq!(
        recv_json(&mut alice).await,
        json!({
            "type": "movement-accepted",
            "payload": {"x": 1, "y": 0, "userId": "alice"},
        })
    );
    assert_eq!(
        recv_json(&mut bob).await,
        json!({
            "type": "move",
            "payload": {"x": 1, "y": 0, "userId": "alice"},
        })
    );
}

#[tokio::test]
async fn test_rejected_move_echoes_position_and_stays_private() {
    // テスト項目: 不正な移動は movement-rejected で現在位置が返り、他の参加者には何も届かない
    // given (前提条件): alice と bob が在室
    let server = TestServer::start(19185).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "default", "alice").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "default", "bob").await;
    recv_json(&mut alice).await; // bob の user-joined

    // when (操作): alice が (0,0) → (5,5) へワープを試みる
    send_json(&mut alice, json!({"type": "move", "payload": {"x": 5, "y": 5}})).await;

    // then (期待する結果): 本人に現在位置の echo、bob は沈黙
    assert_eq!(
        recv_json(&mut alice).await,
        json!({
            "type": "movement-rejected",
            "payload": {"x": 0, "y": 0, "userId": "alice"},
        })
    );
    expect_silence(&mut bob).await;
}

#[tokio::test]
async fn test_disconnect_broadcasts_user_left() {
    // テスト項目: 切断した参加者の user-left が残りの参加者に届く
    // given (前提条件): alice と bob が在室
    let server = TestServer::start(19186).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "default", "alice").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "default", "bob").await;
    recv_json(&mut alice).await; // bob の user-joined

    // when (操作): alice が切断
    alice.close(None).await.expect("Failed to close");

    // then (期待する結果):
    assert_eq!(
        recv_json(&mut bob).await,
        json!({
            "type": "user-left",
            "payload": {"userId": "alice"},
        })
    );
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    // テスト項目: パースできないフレームは無視され、接続はその後も使える
    // given (前提条件):
    let server = TestServer::start(19187).await;
    let mut alice = connect(&server).await;

    // when (操作): 非 JSON とカタログ外 type を送りつける
    alice
        .send(Message::Text("definitely not json".into()))
        .await
        .expect("Failed to send");
    send_json(&mut alice, json!({"type": "teleport", "payload": {"x": 9, "y": 9}})).await;

    // then (期待する結果): 応答なし、そのまま join に成功する
    expect_silence(&mut alice).await;
    let reply = join(&mut alice, "default", "alice").await;
    assert_eq!(reply["type"], "space-joined");
}

#[tokio::test]
async fn test_move_before_join_closes_connection() {
    // テスト項目: join 前の move はプロトコル違反として切断される
    // given (前提条件):
    let server = TestServer::start(19188).await;
    let mut alice = connect(&server).await;

    // when (操作):
    send_json(&mut alice, json!({"type": "move", "payload": {"x": 1, "y": 0}})).await;

    // then (期待する結果):
    expect_closed_without_response(&mut alice).await;
}

#[tokio::test]
async fn test_duplicate_join_closes_connection() {
    // テスト項目: 参加済み接続からの 2 回目の join は切断される
    // given (前提条件): alice が join 済み
    let server = TestServer::start(19189).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "default", "alice").await;

    // when (操作):
    send_json(
        &mut alice,
        json!({
            "type": "join",
            "payload": {"spaceId": "default", "token": issue_token("alice")},
        }),
    )
    .await;

    // then (期待する結果):
    expect_closed_without_response(&mut alice).await;
}

#[tokio::test]
async fn test_spaces_are_isolated() {
    // テスト項目: 別スペースの参加者にはイベントが一切届かない
    // given (前提条件): alice は plaza、bob は office に在室
    let server = TestServer::start_with_spaces(19190, &["plaza", "office"]).await;
    let mut alice = connect(&server).await;
    let reply = join(&mut alice, "plaza", "alice").await;
    assert_eq!(reply["payload"]["users"], json!([]));
    let mut bob = connect(&server).await;
    let reply = join(&mut bob, "office", "bob").await;
    assert_eq!(reply["payload"]["users"], json!([]));

    // when (操作): alice が移動する
    send_json(&mut alice, json!({"type": "move", "payload": {"x": 0, "y": 1}})).await;
    recv_json(&mut alice).await; // movement-accepted

    // then (期待する結果): bob には何も届かない
    expect_silence(&mut bob).await;
}
