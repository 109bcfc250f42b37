//! インメモリ Space Directory 実装
//!
//! ドメイン層が定義する SpaceDirectory trait の具体的な実装。
//! 起動時に設定から与えられたスペース ID の集合を保持し、存在確認のみに
//! 答えます。スペースの作成・削除はプラットフォーム側（マップ管理 API）の
//! 責務で、この実装の対象外です。

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{SpaceDirectory, SpaceId, SpaceLookupError};

/// 固定のスペース ID 集合で存在確認に答える SpaceDirectory 実装
pub struct InMemorySpaceDirectory {
    /// 既知のスペース ID の集合
    spaces: HashSet<SpaceId>,
}

impl InMemorySpaceDirectory {
    /// 新しい InMemorySpaceDirectory を作成
    pub fn new(spaces: impl IntoIterator<Item = SpaceId>) -> Self {
        Self {
            spaces: spaces.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SpaceDirectory for InMemorySpaceDirectory {
    async fn exists(&self, space_id: &SpaceId) -> Result<bool, SpaceLookupError> {
        Ok(self.spaces.contains(space_id))
    }
}
