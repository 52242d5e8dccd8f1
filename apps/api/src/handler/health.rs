//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。認証不要。
//!
//! ```text
//! GET /health
//! ```
//!
//! レスポンスは他のエンドポイントと同じ成功エンベロープに包まれる:
//!
//! ```json
//! { "success": true, "data": { "status": "healthy", "version": "0.1.0" } }
//! ```

use axum::response::Response;
use nippo_shared::HealthResponse;

use crate::error::success_response;

/// ヘルスチェックエンドポイント
///
/// データベースや外部サービスへの接続は確認せず、アプリケーション自体の
/// 起動状態のみを返す。常に 200 OK。
pub async fn health_check() -> Response {
    success_response(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
