//! # API アプリケーション構築
//!
//! ルーター構築とミドルウェアの組み立てを担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use nippo_auth::TokenService;
use nippo_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::ApiConfig,
    error::handle_panic,
    handler::{health_check, me},
    middleware::{AuthState, require_auth},
};

/// ルーターを構築する
///
/// `/health` は認証不要、`/api` 配下は [`require_auth`] の背後に置く。
///
/// # Panics
///
/// `config.jwt_secret` が空の場合（起動時の設定不備）。
pub fn build_app(config: &ApiConfig) -> Router {
    let auth_state = AuthState {
        token_service: Arc::new(TokenService::new(&config.jwt_secret)),
    };

    Router::new()
        .route("/health", get(health_check))
        // 認証必須 API
        .merge(
            Router::new()
                .route("/api/me", get(me))
                .layer(from_fn_with_state(auth_state, require_auth)),
        )
        // パニック境界: ハンドラのパニックを 500 エンベロープに変換する
        .layer(CatchPanicLayer::custom(handle_panic))
        // 下に書いたレイヤーほど外側で実行される。最外の SetRequestIdLayer が
        // 全リクエストに UUID v7 の ID を振り（クライアント提供値があれば優先）、
        // TraceLayer がスパン経由で全ログに request_id を注入し、
        // PropagateRequestIdLayer がレスポンスヘッダーに書き戻す。
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
