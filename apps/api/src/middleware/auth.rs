//! # 認証ミドルウェア
//!
//! `Authorization: Bearer <token>` ヘッダーの JWT を検証し、
//! 認証済みユーザーをリクエスト拡張に載せる。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let auth_state = AuthState {
//!     token_service: Arc::new(TokenService::new(&config.jwt_secret)),
//! };
//!
//! Router::new()
//!     .route("/api/me", get(me))
//!     .layer(from_fn_with_state(auth_state, require_auth))
//! ```
//!
//! 保護されたハンドラは `Extension<AuthUser>` で認証済みユーザーを受け取る。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use nippo_auth::{AuthUser, TokenService};

use crate::error::ApiError;

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthState {
    pub token_service: Arc<TokenService>,
}

/// 認証ミドルウェア
///
/// トークンが提示されていない場合は 401 `UNAUTHORIZED`、検証に失敗した場合は
/// 401 `TOKEN_EXPIRED` / `INVALID_TOKEN` を返し、後続のハンドラは実行しない。
/// 検証に成功した場合のみ [`AuthUser`] をリクエスト拡張に挿入して次へ進む。
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return ApiError::unauthorized().into_response();
    };

    match state.token_service.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims.user);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// ヘッダーがない、または `Bearer ` 形式でない場合は `None` を返す。
/// スキーム名は大文字小文字を区別する。
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// ヘッダーから認証済みユーザーを取得する（任意認証向け）
///
/// 認証があってもなくてもよいルートで使う。トークンがない・無効な場合は
/// エラーにせず `None` を返す。
pub fn get_auth_user(token_service: &TokenService, headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_bearer_token(headers)?;
    token_service.verify(token).ok().map(|claims| claims.user)
}
