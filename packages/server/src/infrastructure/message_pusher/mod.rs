//! メッセージ送信（通知）の実装
//!
//! - `websocket`: WebSocket 接続ごとの送信チャンネルを使った実装
//! - 将来的に: 複数インスタンス間のファンアウト用に pub/sub バックエンド

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
