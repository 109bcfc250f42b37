//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! Session（接続ごとのプロトコル状態機械）から呼び出され、Domain 層と
//! レジストリを操作します。

pub mod error;
pub mod join_space;

pub use error::JoinError;
pub use join_space::{JoinOutcome, JoinSpaceUseCase};
