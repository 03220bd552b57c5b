//! Request handlers.

mod dispatch;
mod http;
mod websocket;

use axum::http::{HeaderMap, header::AUTHORIZATION};

pub use http::{accept_request, get_message_history, health_check, post_message};
pub use websocket::websocket_handler;

/// `Authorization: Bearer <token>` の値
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        // テスト項目: Bearer スキームのトークンだけを取り出す
        // given (前提条件):
        let mut bearer = HeaderMap::new();
        bearer.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));

        // when (操作):
        let token = bearer_token(&bearer);

        // then (期待する結果):
        assert_eq!(token, Some("abc.def.ghi"));
        assert_eq!(bearer_token(&basic), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
