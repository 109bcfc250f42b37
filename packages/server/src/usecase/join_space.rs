//! UseCase: スペース参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSpaceUseCase::execute() メソッド
//! - 参加ハンドシェイク（トークン検証 → スペース存在確認 → レジストリ登録）
//!
//! ### なぜこのテストが必要か
//! - 検証パイプラインの順序を保証：認証失敗時にディレクトリへ問い合わせない
//! - 失敗時にレジストリへ登録されないことを保証
//! - 参加者リスト（マニフェスト）が正しく構築されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンで既存スペースへ参加
//! - 異常系：無効なトークン、存在しないスペース、ディレクトリ障害
//! - エッジケース：先客のいるスペースへの参加（マニフェストのソート順）

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Position, SessionId, SpaceDirectory, SpaceId, Timestamp, TokenVerifier, UserId};
use crate::infrastructure::dto::websocket::{ServerMessage, UserSummary};
use crate::registry::SpaceRegistry;

use super::error::JoinError;

/// 参加ハンドシェイクの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// トークンから確定した参加者の ID
    pub user_id: UserId,
    /// 参加者のスポーン位置
    pub spawn: Position,
    /// 参加時点でスペースにいた他の参加者（user_id でソート済み）
    pub users: Vec<UserSummary>,
}

/// スペース参加のユースケース
pub struct JoinSpaceUseCase {
    /// トークン検証ポート（依存性の逆転）
    verifier: Arc<dyn TokenVerifier>,
    /// スペース存在確認ポート（依存性の逆転）
    directory: Arc<dyn SpaceDirectory>,
    /// プロセス全体の在室レジストリ
    registry: Arc<SpaceRegistry>,
}

impl JoinSpaceUseCase {
    /// 新しい JoinSpaceUseCase を作成
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        directory: Arc<dyn SpaceDirectory>,
        registry: Arc<SpaceRegistry>,
    ) -> Self {
        Self {
            verifier,
            directory,
            registry,
        }
    }

    /// スペース参加を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加する接続のセッション ID
    /// * `space_id` - 参加先スペースの ID（Domain Model）
    /// * `token` - プラットフォーム発行の認証トークン
    /// * `sender` - 参加後にフレームを受け取る送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功（スポーン位置と在室者リスト）
    /// * `Err(JoinError)` - 参加失敗（接続を終了すべき）
    pub async fn execute(
        &self,
        session_id: &SessionId,
        space_id: &SpaceId,
        token: &str,
        sender: mpsc::UnboundedSender<String>,
    ) -> Result<JoinOutcome, JoinError> {
        use hiroba_shared::time::get_jst_timestamp;

        // 1. トークン検証
        let user_id = self.verifier.verify(token).await?;

        // 2. スペースの存在確認
        if !self.directory.exists(space_id).await? {
            return Err(JoinError::SpaceNotFound(space_id.clone()));
        }

        // 3. スポーン位置を確定し、既存メンバー向けの入室通知フレームを組み立てる
        let spawn = Position::default();
        let announce = serde_json::to_string(&ServerMessage::UserJoined {
            x: spawn.x,
            y: spawn.y,
            user_id: user_id.as_str().to_string(),
        })
        .unwrap();

        // 4. レジストリに登録（入室通知は登録と同じクリティカルセクション内で配信される）
        let connected_at = Timestamp::new(get_jst_timestamp());
        let occupants = self
            .registry
            .add_session(space_id, session_id, &user_id, sender, connected_at, &announce)
            .await;

        // 5. 参加者リストを構築
        let mut users: Vec<UserSummary> = occupants
            .iter()
            .map(|occupant| UserSummary {
                user_id: occupant.user_id.as_str().to_string(),
            })
            .collect();

        // Sort by user_id for consistent ordering
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Ok(JoinOutcome {
            user_id,
            spawn,
            users,
        })
    }
}
