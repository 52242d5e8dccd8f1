//! # 認証済みユーザーハンドラ
//!
//! リクエストのトークンに対応するユーザー情報を返すエンドポイント。
//!
//! ```text
//! GET /api/me
//! ```
//!
//! [`crate::middleware::require_auth`] の背後に配置される。

use axum::{Extension, response::Response};
use nippo_auth::AuthUser;

use crate::error::success_response;

/// 認証済みユーザー情報エンドポイント
///
/// トークン検証はミドルウェアで完了しているため、リクエスト拡張に
/// 載ったユーザーをそのまま返す。
#[tracing::instrument(skip_all)]
pub async fn me(Extension(user): Extension<AuthUser>) -> Response {
    success_response(user)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_meは認証済みユーザーをそのまま返す() {
        // Given
        let user = AuthUser {
            user_id:    7,
            email:      "sato@example.com".to_string(),
            is_manager: true,
        };

        // When
        let response = me(Extension(user)).await;

        // Then
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "data": { "userId": 7, "email": "sato@example.com", "isManager": true }
            })
        );
    }
}
