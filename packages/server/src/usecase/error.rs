//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{AuthError, SpaceId, SpaceLookupError};

/// スペース参加処理のエラー
///
/// いずれのエラーも接続の終了につながる。認証・存在確認の失敗理由を
/// クライアントへ返すフレームは存在しない（応答なしで切断する）。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// トークン検証に失敗した
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[from] AuthError),

    /// 指定されたスペースが存在しない
    #[error("space '{0}' not found")]
    SpaceNotFound(SpaceId),

    /// スペースディレクトリへの問い合わせに失敗した
    #[error("space lookup failed: {0}")]
    SpaceLookupFailed(#[from] SpaceLookupError),
}
