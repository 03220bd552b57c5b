//! Repository 実装
//!
//! - `inmemory`: HashMap / Vec をストレージとして使う実装
//! - `fixtures`: JSON ファイルからインメモリストアへの初期データ投入

pub mod fixtures;
pub mod inmemory;

pub use fixtures::{FixtureError, Fixtures};
pub use inmemory::{
    InMemoryConversationRepository, InMemoryMessageRepository, InMemoryUserDirectory,
};
